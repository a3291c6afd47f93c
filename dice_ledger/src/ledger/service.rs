//! Ledger service trait for dependency injection.
//!
//! The engine only ever talks to the authority through this trait, so the
//! HTTP client, the in-process [`HouseLedger`](super::HouseLedger) and test
//! doubles are interchangeable.

use super::errors::LedgerResult;
use crate::wager::{Balance, Bet, Settlement};
use async_trait::async_trait;

/// Authoritative ledger operations
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Report the cached balance and receive the authoritative one.
    ///
    /// Idempotent: repeated calls with no intervening bet return the same value.
    async fn verify_balance(&self, client_balance: Balance) -> LedgerResult<Balance>;

    /// Resolve a bet. The only operation that moves money; atomic from the
    /// caller's point of view.
    async fn roll_dice(&self, bet: Bet) -> LedgerResult<Settlement>;

    /// Replace the balance with a fresh default one
    async fn reset_balance(&self) -> LedgerResult<Balance>;
}
