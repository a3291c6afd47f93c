//! HTTP API for the dice ledger.
//!
//! The server holds the one authoritative [`HouseLedger`]; every balance the
//! client displays comes from a response of this API.
//!
//! # Modules
//!
//! - [`wager`]: Ledger Service operations and the entry log
//! - [`request_id`]: Request correlation and request metrics
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health           - Server health status
//! POST /verify-balance   - Reconcile a cached balance
//! POST /roll-dice        - Settle a bet
//! POST /reset-balance    - Restore the default balance
//! GET  /entries?limit=n  - Recent ledger entries
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use dice_ledger::ledger::HouseLedger;
//! use dice_server::api::{create_router, AppState};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState {
//!     ledger: Arc::new(HouseLedger::new(1000)),
//! };
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively so a browser front end can reach the ledger
//! during development.

pub mod request_id;
pub mod wager;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use dice_ledger::ledger::HouseLedger;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<HouseLedger>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/verify-balance", post(wager::verify_balance))
        .route("/roll-dice", post(wager::roll_dice))
        .route("/reset-balance", post(wager::reset_balance))
        .route("/entries", get(wager::list_entries))
        .layer(axum::middleware::from_fn(request_id::track_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/health
/// # {"status":"healthy","version":"0.1.0","balance":1000,"timestamp":"2026-01-01T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "balance": state.ledger.balance().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
