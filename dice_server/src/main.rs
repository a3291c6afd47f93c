//! Dice ledger server.
//!
//! Owns the authoritative balance and settles every bet sent to it.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use dice_ledger::ledger::HouseLedger;
use dice_server::{
    api,
    config::{ConfigError, ServerConfig},
    logging, metrics,
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run the authoritative dice ledger server

USAGE:
  dice_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:5000]
  --seed       N           Fixed RNG seed for reproducible rolls  [default: env LEDGER_SEED or random]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DEFAULT_BALANCE          Balance granted at startup and on reset  [default: 1000]
  LEDGER_SEED              RNG seed
  METRICS_BIND             Prometheus exporter address (disabled when unset)
  RUST_LOG                 Log filter  [default: info,hyper=warn]
";

struct Args {
    bind: Option<SocketAddr>,
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        seed: pargs.opt_value_from_str("--seed")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.seed)?;
    config.validate()?;

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind)
            .map_err(|e| ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: e,
            })?;
        info!("Prometheus metrics exported at http://{metrics_bind}/metrics");
    }

    let ledger = match config.ledger.seed {
        Some(seed) => {
            info!("Rolling with fixed seed {seed}");
            HouseLedger::with_seed(config.ledger.default_balance, seed)
        }
        None => HouseLedger::new(config.ledger.default_balance),
    };
    info!(
        "Ledger opened with balance {}",
        config.ledger.default_balance
    );

    let app = api::create_router(api::AppState {
        ledger: Arc::new(ledger),
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install CTRL+C signal handler: {e}");
        std::future::pending::<()>().await;
    }
}
