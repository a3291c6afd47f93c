//! Internal modules for the dice client.
//!
//! This library provides the HTTP ledger client, command parsing and
//! rendering used by the dice_client binary.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod display;
