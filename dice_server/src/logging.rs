//! Structured logging configuration.
//!
//! Library code logs through the `log` facade; those records are picked up by
//! the subscriber installed here alongside native `tracing` events.

use dice_ledger::wager::{Balance, Bet, Settlement};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Operations slower than this are logged at warn level.
const SLOW_OPERATION_MS: u64 = 1000;

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use dice_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a settled wager with structured fields
///
/// # Example
///
/// ```
/// use dice_ledger::wager::{Bet, Multiplier, Settlement};
/// use dice_server::logging::log_wager_event;
///
/// let bet = Bet::new(100, Multiplier::X2);
/// let settlement = Settlement { roll: 4, is_win: true, new_balance: 1300, potential_winnings: 300 };
/// log_wager_event(&bet, 1000, &settlement);
/// ```
pub fn log_wager_event(bet: &Bet, balance_before: Balance, settlement: &Settlement) {
    tracing::info!(
        bet_amount = bet.amount,
        multiplier = bet.multiplier.factor(),
        roll = settlement.roll,
        is_win = settlement.is_win,
        balance_before = balance_before,
        balance_after = settlement.new_balance,
        "Wager settled"
    );
}

/// Log a bet the ledger refused
pub fn log_rejected_wager(bet: &Bet, reason: &str) {
    tracing::warn!(
        bet_amount = bet.amount,
        multiplier = bet.multiplier.factor(),
        reason = reason,
        "Wager rejected"
    );
}

/// Log performance metric
///
/// # Arguments
///
/// * `operation` - Operation name
/// * `duration_ms` - Duration in milliseconds
/// * `metadata` - Additional metadata
pub fn log_performance(operation: &str, duration_ms: u64, metadata: Option<&str>) {
    if duration_ms > SLOW_OPERATION_MS {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "PERFORMANCE: Slow operation"
        );
    } else {
        tracing::debug!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "Performance metric"
        );
    }
}
