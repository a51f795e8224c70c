//! Correlator errors

/// Errors raised while extracting records from decoded logs and transactions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A log or call could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] etheroll_decoder::error::Error),
    /// A decoded event has no parameter with the expected name.
    #[error("Missing field: {0}")]
    MissingField(String),
    /// A decoded parameter does not have the expected type.
    #[error("Unexpected type: {0}")]
    UnexpectedType(String),
    /// A timestamp is neither a decimal nor a hex unix time.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// A block number or an amount is not a valid number.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    /// Anything else, mostly io.
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
