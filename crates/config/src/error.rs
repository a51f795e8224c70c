//! Configuration errors

/// Errors raised while reading, validating or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The home directory or the config file could not be accessed.
    #[error("Error: {0}")]
    Generic(String),

    /// The config file, or a value set through `update`, is invalid.
    #[error("Parse error: {0}")]
    ParseError(String),
}
