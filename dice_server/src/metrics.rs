//! Prometheus metrics for the ledger service.
//!
//! Counters are recorded through the `metrics` facade. They are only exported
//! when [`init_metrics`] installed a Prometheus listener; otherwise the calls
//! are no-ops.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use dice_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::dice_rolls_total(true);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
///
/// Increments the total HTTP request counter with method, path, and status labels.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Ledger Metrics
// ============================================================================

/// Increment settled rolls counter.
pub fn dice_rolls_total(is_win: bool) {
    let outcome = if is_win { "win" } else { "loss" };
    metrics::counter!("dice_rolls_total", "outcome" => outcome).increment(1);
}

/// Record wagered amount distribution.
pub fn bet_amount_chips(amount: u64) {
    metrics::histogram!("bet_amount_chips").record(amount as f64);
}

/// Increment balance resets counter.
pub fn balance_resets_total() {
    metrics::counter!("balance_resets_total").increment(1);
}

/// Increment refused bets counter.
pub fn ledger_rejections_total(reason: &str) {
    metrics::counter!("ledger_rejections_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Set the current authoritative balance.
pub fn ledger_balance(balance: u64) {
    metrics::gauge!("ledger_balance").set(balance as f64);
}
