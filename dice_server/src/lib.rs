//! Authoritative ledger service for the dice game.
//!
//! Exposes a [`dice_ledger::ledger::HouseLedger`] over HTTP so that remote
//! wager engines can verify, settle and reset against it.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
