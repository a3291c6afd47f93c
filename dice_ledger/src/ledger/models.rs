//! Ledger data models.

use crate::wager::Balance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ledger entry (append-only audit trail)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u64,
    pub amount: Balance,
    pub balance_after: Balance,
    pub direction: EntryDirection,
    pub entry_type: EntryType,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Signed effect of the entry on the balance
    pub fn signed_amount(&self) -> i128 {
        match self.direction {
            EntryDirection::Credit => i128::from(self.amount),
            EntryDirection::Debit => -i128::from(self.amount),
        }
    }
}

/// Entry direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    Debit,
    Credit,
}

impl std::fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryDirection::Debit => write!(f, "debit"),
            EntryDirection::Credit => write!(f, "credit"),
        }
    }
}

/// Entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Balance the account was opened with
    Opening,
    /// Stake taken for a bet
    Wager,
    /// Winnings credited for a bet
    Payout,
    /// Balance replaced by a reset
    Reset,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::Opening => write!(f, "opening"),
            EntryType::Wager => write!(f, "wager"),
            EntryType::Payout => write!(f, "payout"),
            EntryType::Reset => write!(f, "reset"),
        }
    }
}
