mod args;
mod filter;
mod records;
mod transactions;

// re-export
pub use args::*;
pub use filter::*;
pub use records::*;
pub use transactions::*;
