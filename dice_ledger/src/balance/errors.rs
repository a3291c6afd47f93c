//! Balance store error types.

use thiserror::Error;

/// Balance store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store contents could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value exists under the balance key but is not a balance
    #[error("Corrupt cached balance: {0}")]
    Corrupt(String),

    /// Store is temporarily unusable
    #[error("Balance store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for balance store operations
pub type StoreResult<T> = Result<T, StoreError>;
