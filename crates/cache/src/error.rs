//! Cache errors

/// Errors raised by [`ScopedCache`](crate::ScopedCache) operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The cache lock was poisoned by a panicking writer
    #[error("cache lock poisoned")]
    Poisoned,
}
