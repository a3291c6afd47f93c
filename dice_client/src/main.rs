//! A terminal client for the dice game.
//!
//! The client caches its balance locally, reconciles it with the ledger server
//! on startup, and sends every bet to the server for settlement.

use anyhow::{Context, Result};
use dice_client::{
    api_client::LedgerClient,
    commands::{Command, HELP as COMMANDS_HELP, parse_command},
    config::ClientConfig,
    display::{render_event, render_session},
};
use dice_ledger::{
    balance::FileBalanceStore,
    wager::{WagerEngine, outcome_channel},
};
use pico_args::Arguments;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Play dice against a ledger server

USAGE:
  dice_client [OPTIONS]

OPTIONS:
  --ledger URL          Ledger server URL  [default: env LEDGER_URL or http://localhost:5000]
  --store PATH          Balance cache file  [default: env BALANCE_STORE_PATH or dice_balance.json]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  DEFAULT_BALANCE       Balance assumed before the first reconciliation  [default: 1000]
  LEDGER_TIMEOUT_SECS   Ledger request timeout  [default: 10]
  RUST_LOG              Log filter  [default: warn]
";

struct Args {
    ledger_url: Option<String>,
    store_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        ledger_url: pargs.opt_value_from_str("--ledger")?,
        store_path: pargs.opt_value_from_str("--store")?,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    run(ClientConfig::from_env(args.ledger_url, args.store_path)?).await
}

async fn run(config: ClientConfig) -> Result<()> {
    let ledger = LedgerClient::new(config.ledger_url.clone(), config.engine.request_timeout)?;
    let store = FileBalanceStore::new(config.store_path.clone());
    log::info!("Caching balance in {}", config.store_path.display());
    let (events, mut outcomes) = outcome_channel();

    let engine = WagerEngine::new(Arc::new(store), Arc::new(ledger), config.engine, events);

    // Toasts are printed as they arrive, independent of the prompt.
    tokio::spawn(async move {
        while let Some(event) = outcomes.recv().await {
            println!("{}", render_event(&event));
        }
    });

    println!("Connecting to ledger at {}...", config.ledger_url);
    let balance = engine.reconcile().await;
    println!("Balance: ${balance}. Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Bet(amount) => {
                if !engine.enter_bet_amount(&amount).await {
                    println!(
                        "Bet must be whole chips not above your balance (${})",
                        engine.balance().await
                    );
                }
            }
            Command::QuickBet(preset) => {
                let amount = engine.quick_bet(preset).await;
                println!("Bet set to {amount} ({preset} of balance)");
            }
            Command::Multiplier(multiplier) => {
                engine.select_multiplier(multiplier).await;
                println!("Multiplier set to {multiplier}");
            }
            // Outcomes, including failures, arrive on the event channel.
            Command::Roll => {
                let _ = engine.roll().await;
            }
            Command::Reset => {
                let _ = engine.reset().await;
            }
            Command::Balance => println!("{}", render_session(&engine.snapshot().await)),
            Command::Help => println!("{COMMANDS_HELP}"),
            Command::Quit => break,
        }
    }

    println!("Final balance: ${}", engine.balance().await);
    Ok(())
}
