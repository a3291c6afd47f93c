//! Client-side balance cache.
//!
//! The store only remembers the last balance the engine accepted so that a
//! session can start (or keep going) without the ledger. It never decides
//! anything on its own.
//!
//! ## Example
//!
//! ```no_run
//! use dice_ledger::balance::{BalanceStore, FileBalanceStore};
//!
//! let store = FileBalanceStore::new("dice_balance.json");
//! store.save(1000)?;
//! assert_eq!(store.load()?, Some(1000));
//! # Ok::<(), dice_ledger::balance::StoreError>(())
//! ```

pub mod errors;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use store::{BalanceStore, FileBalanceStore, MemoryBalanceStore};
