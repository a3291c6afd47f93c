//! HTTP client for the ledger server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dice_ledger::{
    ledger::{LedgerEntry, LedgerError, LedgerResult, LedgerService},
    wager::{Balance, Bet, Settlement},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

/// [`LedgerService`] backed by a remote `dice_server`
pub struct LedgerClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyBalanceRequest {
    current_balance: Balance,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: Balance,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl LedgerClient {
    /// Create a new ledger client
    ///
    /// `timeout` bounds every request end to end.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch recent ledger entries, newest first
    pub async fn entries(&self, limit: usize) -> LedgerResult<Vec<LedgerEntry>> {
        let request = self
            .client
            .get(format!("{}/entries", self.base_url))
            .query(&[("limit", limit)]);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> LedgerResult<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .map(|body| body.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(LedgerError::Service {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| LedgerError::UnexpectedResponse(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> LedgerError {
    if e.is_timeout() {
        LedgerError::Timeout
    } else {
        LedgerError::Network(e.to_string())
    }
}

#[async_trait]
impl LedgerService for LedgerClient {
    async fn verify_balance(&self, client_balance: Balance) -> LedgerResult<Balance> {
        let request = self
            .client
            .post(format!("{}/verify-balance", self.base_url))
            .json(&VerifyBalanceRequest {
                current_balance: client_balance,
            });
        let body: BalanceResponse = self.send(request).await?;
        Ok(body.balance)
    }

    async fn roll_dice(&self, bet: Bet) -> LedgerResult<Settlement> {
        let request = self
            .client
            .post(format!("{}/roll-dice", self.base_url))
            .json(&bet);
        self.send(request).await
    }

    async fn reset_balance(&self) -> LedgerResult<Balance> {
        let request = self.client.post(format!("{}/reset-balance", self.base_url));
        let body: BalanceResponse = self.send(request).await?;
        Ok(body.balance)
    }
}
