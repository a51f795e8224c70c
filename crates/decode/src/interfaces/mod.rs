mod args;
mod decoded;
mod log;

// re-export
pub use args::*;
pub use decoded::*;
pub use log::*;
