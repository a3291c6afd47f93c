//! Client configuration.

use dice_ledger::wager::{ConfigError, EngineConfig};
use std::path::PathBuf;

pub const DEFAULT_LEDGER_URL: &str = "http://localhost:5000";
pub const DEFAULT_STORE_PATH: &str = "dice_balance.json";

/// Everything the terminal client needs to start a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the ledger server
    pub ledger_url: String,
    /// File the balance cache lives in
    pub store_path: PathBuf,
    pub engine: EngineConfig,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `LEDGER_URL`: Ledger server URL (default: http://localhost:5000)
    /// - `BALANCE_STORE_PATH`: Balance cache file (default: dice_balance.json)
    /// - `DEFAULT_BALANCE`, `LEDGER_TIMEOUT_SECS`: see [`EngineConfig::from_env`]
    ///
    /// Overrides (from CLI args) win over the environment.
    ///
    /// # Errors
    ///
    /// Returns error if an engine variable is set but malformed
    pub fn from_env(
        url_override: Option<String>,
        store_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let ledger_url = url_override
            .or_else(|| std::env::var("LEDGER_URL").ok())
            .unwrap_or_else(|| DEFAULT_LEDGER_URL.to_string());

        let store_path = store_override
            .or_else(|| std::env::var("BALANCE_STORE_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        Ok(Self {
            ledger_url,
            store_path,
            engine: EngineConfig::from_env()?,
        })
    }
}
