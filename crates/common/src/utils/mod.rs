/// Environment variable utilities.
pub mod env;

/// Parsing of explorer quantities and wei amounts.
pub mod integers;

/// Input/output utilities for file manipulation.
pub mod io;

/// Hex string encoding and decoding utilities.
pub mod strings;

/// Timestamp parsing and formatting utilities.
pub mod time;
