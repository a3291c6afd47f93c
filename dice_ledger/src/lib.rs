//! # Dice Ledger
//!
//! Balance reconciliation and bet settlement for a single-player dice game.
//!
//! A player holds a balance, picks a payout multiplier and bets part of the
//! balance on a die roll. The roll and the resulting balance are decided by an
//! authoritative ledger; the client keeps a cached copy of the balance so the
//! game survives restarts and short outages.
//!
//! ## Architecture
//!
//! Two tiers, leaves first:
//!
//! - **BalanceStore**: durable local cache of the last accepted balance
//! - **WagerEngine**: validates bets locally, reconciles the cache at startup,
//!   and routes every money movement through a **LedgerService**
//!
//! The ledger's balance always wins. When it cannot be reached the cached
//! balance is kept, never improved upon.
//!
//! ## Core Modules
//!
//! - [`balance`]: Balance store trait and file/memory implementations
//! - [`wager`]: Engine, validation rules, data models and outcome events
//! - [`ledger`]: Ledger service trait and the in-process [`HouseLedger`]
//!
//! ## Example
//!
//! ```
//! use dice_ledger::wager::{QuickBet, validate_bet};
//!
//! assert_eq!(QuickBet::Half.amount_of(999), 499);
//! assert!(validate_bet("150", 100).is_err());
//! ```

/// Client-side balance cache.
pub mod balance;

/// Authoritative ledger seam and in-process implementation.
pub mod ledger;

/// Bet validation, reconciliation and settlement.
pub mod wager;

pub use balance::{BalanceStore, FileBalanceStore, MemoryBalanceStore};
pub use ledger::{HouseLedger, LedgerError, LedgerService};
pub use wager::{
    Balance, Bet, EngineConfig, Multiplier, OutcomeEvent, Settlement, WagerEngine, WagerError,
};
