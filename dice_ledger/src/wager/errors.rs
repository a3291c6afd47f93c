//! Wager error types.

use crate::ledger::LedgerError;
use thiserror::Error;

/// Wager errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WagerError {
    /// Bet amount is empty, zero, or not a plain non-negative integer
    #[error("Invalid bet amount: {0:?}")]
    InvalidAmount(String),

    /// Bet amount exceeds the cached balance
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: u64, required: u64 },

    /// Ledger service could not be reached or did not answer in time
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Ledger service answered with an error or an unexpected payload
    #[error("Ledger service error: {0}")]
    ServiceError(String),

    /// Another bet or reset is still waiting for the ledger
    #[error("A ledger request is already in flight")]
    RequestInFlight,
}

impl WagerError {
    /// Short message suitable for showing to the player
    pub fn client_message(&self) -> String {
        match self {
            WagerError::InvalidAmount(_) => "Please enter a valid bet amount".to_string(),
            WagerError::InsufficientBalance { .. } => "Insufficient balance".to_string(),
            WagerError::RequestInFlight => "Please wait for the current roll".to_string(),
            WagerError::NetworkFailure(_) => "Ledger service unreachable".to_string(),
            WagerError::ServiceError(_) => "Ledger service error".to_string(),
        }
    }

    /// Whether the error was raised locally without touching the ledger
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            WagerError::InvalidAmount(_)
                | WagerError::InsufficientBalance { .. }
                | WagerError::RequestInFlight
        )
    }
}

impl From<LedgerError> for WagerError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Network(_) | LedgerError::Timeout => {
                WagerError::NetworkFailure(err.to_string())
            }
            _ => WagerError::ServiceError(err.to_string()),
        }
    }
}

/// Result type for wager operations
pub type WagerResult<T> = Result<T, WagerError>;
