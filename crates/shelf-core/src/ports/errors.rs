use thiserror::Error;

/// Failure to turn a locator into a vault-owned file.
///
/// Recoverable: the store keeps the capture with its original locator.
#[derive(Debug, Error)]
pub enum MaterializationError {
    #[error("unsupported locator: {0}")]
    UnsupportedLocator(String),

    #[error("source unavailable: {locator}: {reason}")]
    SourceUnavailable { locator: String, reason: String },

    #[error("copy interrupted: {locator}")]
    CopyInterrupted {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    #[error("asset vault unavailable")]
    VaultUnavailable(#[source] std::io::Error),
}

/// Failure of the durable record store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("record read failed: {0}")]
    Read(String),

    #[error("record write failed: {0}")]
    Write(String),

    /// The stored record exists but cannot be decoded as a whole.
    #[error("record corrupt: {0}")]
    Corrupt(String),

    #[error("invalid record key: {0}")]
    InvalidKey(String),
}
