//! Engine configuration.

use super::models::{Balance, DEFAULT_BALANCE};
use std::time::Duration;
use thiserror::Error;

/// Default time allowed for a single ledger round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Wager engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Balance assumed when nothing has been cached yet
    pub default_balance: Balance,

    /// Upper bound on every ledger call; elapsing counts as a network failure
    pub request_timeout: Duration,
}

impl EngineConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `DEFAULT_BALANCE`: Seed balance (default: 1000)
    /// - `LEDGER_TIMEOUT_SECS`: Ledger request timeout (default: 10)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but malformed,
    /// or when the loaded values fail [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_balance = parse_env_opt("DEFAULT_BALANCE")?.unwrap_or(DEFAULT_BALANCE);
        let request_timeout = parse_env_opt("LEDGER_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let config = Self {
            default_balance,
            request_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "LEDGER_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_balance: DEFAULT_BALANCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Parse an optional variable; set but malformed is an error
pub fn parse_env_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: serialized with every other test touching the environment.
        unsafe {
            std::env::remove_var("DEFAULT_BALANCE");
            std::env::remove_var("LEDGER_TIMEOUT_SECS");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(EngineConfig::from_env(), Ok(EngineConfig::default()));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("DEFAULT_BALANCE", "250");
            std::env::set_var("LEDGER_TIMEOUT_SECS", "3");
        }

        let config = EngineConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.default_balance, 250);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_balance() {
        clear_env();
        unsafe { std::env::set_var("DEFAULT_BALANCE", "1e6") };

        let err = EngineConfig::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("DEFAULT_BALANCE"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_negative_timeout() {
        clear_env();
        unsafe { std::env::set_var("LEDGER_TIMEOUT_SECS", "-5") };

        let err = EngineConfig::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("LEDGER_TIMEOUT_SECS"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_timeout() {
        clear_env();
        unsafe { std::env::set_var("LEDGER_TIMEOUT_SECS", "0") };

        let err = EngineConfig::from_env().unwrap_err();
        clear_env();

        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "LEDGER_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            }
        );
    }
}
