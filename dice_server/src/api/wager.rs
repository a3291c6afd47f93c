//! Ledger API handlers.
//!
//! These are the three Ledger Service operations the client engine depends on,
//! plus a read-only view of the entry log:
//! - Verifying a client-cached balance against the ledger
//! - Rolling the die for a bet and settling it
//! - Resetting the balance to the configured default
//!
//! # Examples
//!
//! Roll for a 100 chip bet at 2x:
//! ```bash
//! curl -X POST http://localhost:5000/roll-dice \
//!   -H "Content-Type: application/json" \
//!   -d '{"betAmount": 100, "multiplier": 2}'
//! ```

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use dice_ledger::{
    ledger::{LedgerEntry, LedgerError, LedgerService},
    wager::{Balance, Bet, Settlement},
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{AppState, request_id::RequestId};
use crate::{logging, metrics};

const DEFAULT_ENTRY_LIMIT: usize = 50;
const MAX_ENTRY_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyBalanceRequest {
    pub current_balance: Balance,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: Balance,
}

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn ledger_error(e: LedgerError) -> ApiError {
    let status = match &e {
        LedgerError::Rejected(_) => StatusCode::BAD_REQUEST,
        LedgerError::Overflow => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Verify a client-cached balance.
///
/// The ledger never adopts the client's figure; the response always carries
/// the authoritative balance.
///
/// # Request Body
///
/// ```json
/// {"currentBalance": 1000}
/// ```
///
/// # Response
///
/// Returns `200 OK` with `{"balance": 1000}`.
pub async fn verify_balance(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<VerifyBalanceRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state
        .ledger
        .verify_balance(request.current_balance)
        .await
        .map_err(ledger_error)?;

    tracing::debug!(
        request_id = %request_id.as_str(),
        client_balance = request.current_balance,
        balance = balance,
        "Balance verified"
    );

    metrics::ledger_balance(balance);
    Ok(Json(BalanceResponse { balance }))
}

/// Roll the die for a bet and settle it.
///
/// # Request Body
///
/// ```json
/// {"betAmount": 100, "multiplier": 2}
/// ```
///
/// # Response
///
/// Returns `200 OK` with the settlement:
/// ```json
/// {"roll": 4, "isWin": true, "newBalance": 1300, "potentialWinnings": 300}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Zero amount or exposure above the ledger balance
/// - `422 Unprocessable Entity`: Settlement would overflow, or a malformed body
pub async fn roll_dice(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(bet): Json<Bet>,
) -> Result<Json<Settlement>, ApiError> {
    let started = Instant::now();
    metrics::bet_amount_chips(bet.amount);

    match state.ledger.roll_dice(bet).await {
        Ok(settlement) => {
            let delta = settlement.amount_delta(&bet);
            let balance_before = if settlement.is_win {
                settlement.new_balance - delta
            } else {
                settlement.new_balance + delta
            };

            logging::log_wager_event(&bet, balance_before, &settlement);
            logging::log_performance(
                "roll_dice",
                started.elapsed().as_millis() as u64,
                Some(request_id.as_str()),
            );
            metrics::dice_rolls_total(settlement.is_win);
            metrics::ledger_balance(settlement.new_balance);

            Ok(Json(settlement))
        }
        Err(e) => {
            let reason = match &e {
                LedgerError::Rejected(reason) => reason.clone(),
                other => other.to_string(),
            };
            logging::log_rejected_wager(&bet, &reason);
            metrics::ledger_rejections_total(&reason);
            Err(ledger_error(e))
        }
    }
}

/// Reset the balance to the configured default.
///
/// # Response
///
/// Returns `200 OK` with `{"balance": 1000}`.
pub async fn reset_balance(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.ledger.reset_balance().await.map_err(ledger_error)?;

    tracing::info!(request_id = %request_id.as_str(), balance = balance, "Balance reset");
    metrics::balance_resets_total();
    metrics::ledger_balance(balance);

    Ok(Json(BalanceResponse { balance }))
}

/// List recent ledger entries, newest first.
///
/// # Query Parameters
///
/// - `limit`: Maximum entries to return (default 50, capped at 500)
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Json<Vec<LedgerEntry>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_ENTRY_LIMIT)
        .min(MAX_ENTRY_LIMIT);
    Json(state.ledger.entries(limit).await)
}
