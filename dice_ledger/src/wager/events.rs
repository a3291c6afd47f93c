//! Outcome events surfaced to the presentation layer.
//!
//! Events are fire-and-forget: the engine never waits on, or reads anything
//! back from, whoever consumes them.

use super::{errors::WagerError, models::Balance};
use tokio::sync::mpsc;

/// Outcome of an engine operation, for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeEvent {
    /// A bet or reset was refused before reaching the ledger
    BetRejected(WagerError),

    /// The ledger settled a bet
    RollResolved {
        roll: u8,
        is_win: bool,
        amount_delta: Balance,
    },

    /// A ledger round trip failed; nothing was applied
    NetworkFailure(String),

    /// The ledger issued a fresh balance
    BalanceReset(Balance),
}

impl std::fmt::Display for OutcomeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeEvent::BetRejected(reason) => write!(f, "{}", reason.client_message()),
            OutcomeEvent::RollResolved {
                roll,
                is_win: true,
                amount_delta,
            } => write!(f, "You won! Rolled a {roll}. Won ${amount_delta}"),
            OutcomeEvent::RollResolved {
                roll,
                is_win: false,
                amount_delta,
            } => write!(f, "You lost! Rolled a {roll}. Lost ${amount_delta}"),
            OutcomeEvent::NetworkFailure(context) => write!(f, "Failed to {context}"),
            OutcomeEvent::BalanceReset(balance) => write!(f, "Balance reset to ${balance}!"),
        }
    }
}

pub type OutcomeSender = mpsc::UnboundedSender<OutcomeEvent>;
pub type OutcomeReceiver = mpsc::UnboundedReceiver<OutcomeEvent>;

/// Create the channel an engine publishes its outcome events on.
pub fn outcome_channel() -> (OutcomeSender, OutcomeReceiver) {
    mpsc::unbounded_channel()
}
