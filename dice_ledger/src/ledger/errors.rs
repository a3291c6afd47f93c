//! Ledger error types.

use thiserror::Error;

/// Ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Ledger could not be reached
    #[error("Ledger unreachable: {0}")]
    Network(String),

    /// Ledger did not answer within the allotted time
    #[error("Ledger request timed out")]
    Timeout,

    /// Ledger answered with a non-success status
    #[error("Ledger returned status {status}: {message}")]
    Service { status: u16, message: String },

    /// Ledger answered with a payload of the wrong shape
    #[error("Unexpected ledger response: {0}")]
    UnexpectedResponse(String),

    /// Ledger refused the bet after re-validating it
    #[error("Bet rejected: {0}")]
    Rejected(String),

    /// Settlement would overflow the balance
    #[error("Balance overflow")]
    Overflow,
}

impl LedgerError {
    /// Whether the failure happened on the way to or from the ledger
    pub fn is_transport(&self) -> bool {
        matches!(self, LedgerError::Network(_) | LedgerError::Timeout)
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
