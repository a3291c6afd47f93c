//! The authoritative side of the game.
//!
//! This module implements:
//! - The [`LedgerService`] seam the engine resolves bets through
//! - [`HouseLedger`], an in-process authority that re-validates bets
//! - An append-only entry log of every balance movement
//!
//! ## Example
//!
//! ```
//! use dice_ledger::ledger::{HouseLedger, LedgerService};
//! use dice_ledger::wager::{Bet, Multiplier};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ledger = HouseLedger::with_loaded_die(1000, [4]);
//! let settlement = ledger.roll_dice(Bet::new(100, Multiplier::X2)).await?;
//! assert_eq!(settlement.new_balance, 1300);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod house;
pub mod models;
pub mod service;

pub use errors::{LedgerError, LedgerResult};
pub use house::{HouseLedger, settle_roll, win_threshold};
pub use models::{EntryDirection, EntryType, LedgerEntry};
pub use service::LedgerService;
