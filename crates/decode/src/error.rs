//! Decoder errors

/// Errors raised while building a catalog or decoding calls and logs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The buffer is shorter than its head region, or a dynamic offset or length points
    /// outside of it.
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),
    /// No function or event in the catalog matches the selector.
    #[error("Unknown selector: {0}")]
    UnknownSelector(String),
    /// A function or event in the interface description cannot be cataloged.
    #[error("Malformed member: {0}")]
    MalformedMember(String),
    /// The interface description is not a valid JSON ABI document.
    #[error("Invalid interface description: {0}")]
    InvalidDescription(String),
    /// A payload, topic, or data string is not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    /// The catalog cache failed.
    #[error("Cache error: {0}")]
    CacheError(#[from] etheroll_cache::error::Error),
    /// Anything else, mostly io.
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
