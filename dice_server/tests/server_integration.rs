//! Integration tests for the ledger HTTP API.
//!
//! Drives the router in-process with `oneshot`, against a ledger whose die is
//! loaded so outcomes are known in advance.

use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use dice_ledger::ledger::HouseLedger;
use dice_server::api::{AppState, create_router, request_id::REQUEST_ID_HEADER};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot` method

fn create_test_server(faces: &[u8]) -> (axum::Router, Arc<HouseLedger>) {
    let ledger = Arc::new(HouseLedger::with_loaded_die(1000, faces.to_vec()));
    let app = create_router(AppState {
        ledger: ledger.clone(),
    });
    (app, ledger)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let (app, _) = create_test_server(&[1]);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["balance"], 1000);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (app, _) = create_test_server(&[1]);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

// ============================================================================
// Ledger Operation Tests
// ============================================================================

#[tokio::test]
async fn test_verify_balance_returns_ledger_figure() {
    let (app, _) = create_test_server(&[1]);

    for claimed in [1000, 999_999, 0] {
        let (status, body) = send(
            &app,
            post_json("/verify-balance", json!({ "currentBalance": claimed })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "balance": 1000 }));
    }
}

#[tokio::test]
async fn test_roll_dice_win() {
    let (app, ledger) = create_test_server(&[4]);

    let (status, body) = send(
        &app,
        post_json("/roll-dice", json!({ "betAmount": 100, "multiplier": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "roll": 4, "isWin": true, "newBalance": 1300, "potentialWinnings": 300 })
    );
    assert_eq!(ledger.balance().await, 1300);
}

#[tokio::test]
async fn test_roll_dice_loss() {
    let (app, ledger) = create_test_server(&[2]);

    let (status, body) = send(
        &app,
        post_json("/roll-dice", json!({ "betAmount": 100, "multiplier": 3 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isWin"], false);
    assert_eq!(body["newBalance"], 700);
    assert_eq!(ledger.balance().await, 700);
}

#[tokio::test]
async fn test_roll_dice_rejects_excess_exposure() {
    let (app, ledger) = create_test_server(&[6]);

    let (status, body) = send(
        &app,
        post_json("/roll-dice", json!({ "betAmount": 600, "multiplier": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("insufficient balance"));
    assert_eq!(ledger.balance().await, 1000);
}

#[tokio::test]
async fn test_roll_dice_rejects_zero_amount() {
    let (app, _) = create_test_server(&[6]);

    let (status, body) = send(
        &app,
        post_json("/roll-dice", json!({ "betAmount": 0, "multiplier": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_roll_dice_rejects_unknown_multiplier() {
    let (app, ledger) = create_test_server(&[6]);

    let request = post_json("/roll-dice", json!({ "betAmount": 10, "multiplier": 7 }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ledger.balance().await, 1000);
}

#[tokio::test]
async fn test_reset_balance_after_losses() {
    let (app, _) = create_test_server(&[1]);

    let (_, body) = send(
        &app,
        post_json("/roll-dice", json!({ "betAmount": 300, "multiplier": 3 })),
    )
    .await;
    assert_eq!(body["newBalance"], 100);

    let request = Request::builder()
        .method("POST")
        .uri("/reset-balance")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "balance": 1000 }));
}

#[tokio::test]
async fn test_entries_newest_first() {
    let (app, _) = create_test_server(&[5, 1]);

    for _ in 0..2 {
        send(
            &app,
            post_json("/roll-dice", json!({ "betAmount": 10, "multiplier": 1 })),
        )
        .await;
    }

    let request = Request::builder()
        .uri("/entries?limit=2")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["entry_type"], "wager");
    assert_eq!(entries[0]["direction"], "debit");
    assert_eq!(entries[1]["entry_type"], "payout");
    assert_eq!(entries[0]["balance_after"], 1010);
}
