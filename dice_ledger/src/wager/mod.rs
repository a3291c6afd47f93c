//! Client-side wager handling: validation, reconciliation and settlement.
//!
//! This module implements:
//! - Local pre-flight validation of bet amounts
//! - Quick-bet presets and multiplier selection
//! - Startup reconciliation of the cached balance against the ledger
//! - Single-flight bet settlement and balance reset
//! - Fire-and-forget outcome events for the presentation layer
//!
//! ## Example
//!
//! ```no_run
//! use dice_ledger::balance::FileBalanceStore;
//! use dice_ledger::ledger::HouseLedger;
//! use dice_ledger::wager::{EngineConfig, Multiplier, WagerEngine, outcome_channel};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (events, mut outcomes) = outcome_channel();
//!     let engine = WagerEngine::new(
//!         Arc::new(FileBalanceStore::new("dice_balance.json")),
//!         Arc::new(HouseLedger::new(1000)),
//!         EngineConfig::default(),
//!         events,
//!     );
//!
//!     engine.reconcile().await;
//!     engine.select_multiplier(Multiplier::X2).await;
//!     engine.enter_bet_amount("100").await;
//!     engine.roll().await?;
//!
//!     if let Some(outcome) = outcomes.recv().await {
//!         println!("{outcome}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod models;
pub mod validation;

pub use config::{ConfigError, EngineConfig};
pub use engine::{SessionState, WagerEngine};
pub use errors::{WagerError, WagerResult};
pub use events::{OutcomeEvent, OutcomeReceiver, OutcomeSender, outcome_channel};
pub use models::{
    BALANCE_KEY, Balance, Bet, BetPhase, DEFAULT_BALANCE, DIE_FACES, Multiplier, QuickBet,
    Settlement, UnknownMultiplier,
};
pub use validation::{accepts_input, parse_amount, quick_bet_amount, validate_bet};
