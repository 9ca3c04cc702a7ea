//! Simmer brokerage API client
//!
//! Authenticated with a static bearer token. Live trading imports the
//! Polymarket market broker-side first, then submits the order and returns
//! the broker's response untouched. Portfolio balance and open positions
//! back the smart sizer and the `positions` subcommand.

use super::{Executor, TradeIntent, MIN_SHARES_PER_ORDER, TRADE_SOURCE, TRADE_VENUE};
use crate::config::Credentials;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Client for the Simmer SDK API
pub struct SimmerClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Portfolio summary response
#[derive(Debug, Deserialize)]
struct PortfolioResponse {
    balance: Option<Decimal>,
}

/// One open position as reported by the broker
#[derive(Debug, Clone, Deserialize)]
pub struct SimmerPosition {
    #[serde(default)]
    pub market_slug: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub side: String,
    pub shares: Option<Decimal>,
    pub current_value: Option<Decimal>,
}

/// Positions listing response
#[derive(Debug, Deserialize)]
struct PositionsResponse {
    #[serde(default)]
    positions: Vec<SimmerPosition>,
}

impl SimmerClient {
    /// Create a client from resolved credentials
    pub fn new(credentials: &Credentials) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("fastloop/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: credentials.api_base.clone(),
            api_key: credentials.api_key.clone(),
        }
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.api_key)
    }

    /// Ensure the Polymarket market exists broker-side before trading
    pub async fn import_market(&self, condition_id: &str) -> anyhow::Result<serde_json::Value> {
        let url = format!("{}/api/sdk/markets/import", self.base_url);
        let body = serde_json::json!({ "condition_id": condition_id });

        let response = self.auth(self.client.post(&url)).json(&body).send().await?;
        let status = response.status();
        let value: serde_json::Value = response.json().await.unwrap_or_default();

        if !status.is_success() {
            anyhow::bail!("market import failed: {} - {}", status, value);
        }
        Ok(value)
    }

    /// Submit a trade; the raw broker response is returned verbatim
    pub async fn submit_trade(&self, intent: &TradeIntent) -> anyhow::Result<serde_json::Value> {
        let url = format!("{}/api/sdk/trade", self.base_url);
        let body = trade_payload(intent);

        let response = self.auth(self.client.post(&url)).json(&body).send().await?;
        let status = response.status();
        let value: serde_json::Value = response.json().await.unwrap_or_default();

        if !status.is_success() {
            anyhow::bail!("trade submission failed: {} - {}", status, value);
        }
        Ok(value)
    }

    /// Live portfolio balance; None on any failure so callers can fall back
    pub async fn balance(&self) -> Option<Decimal> {
        let url = format!("{}/api/sdk/portfolio", self.base_url);

        let response = match self.auth(self.client.get(&url)).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                tracing::warn!(status = %r.status(), "Portfolio fetch failed");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Portfolio fetch failed");
                return None;
            }
        };

        match response.json::<PortfolioResponse>().await {
            Ok(portfolio) => portfolio.balance,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed portfolio response");
                None
            }
        }
    }

    /// Open positions, filtered to fast markets
    pub async fn fast_market_positions(&self) -> anyhow::Result<Vec<SimmerPosition>> {
        let url = format!("{}/api/sdk/positions", self.base_url);

        let response = self.auth(self.client.get(&url)).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("positions fetch failed: {}", response.status());
        }

        let listing: PositionsResponse = response.json().await?;
        Ok(listing
            .positions
            .into_iter()
            .filter(|p| p.market_slug.contains("up-or-down"))
            .collect())
    }
}

#[async_trait]
impl Executor for SimmerClient {
    async fn execute(&self, intent: &TradeIntent) -> anyhow::Result<serde_json::Value> {
        if intent.amount_usd < Decimal::from(MIN_SHARES_PER_ORDER) {
            tracing::warn!(
                amount_usd = %intent.amount_usd,
                min_shares = MIN_SHARES_PER_ORDER,
                "Amount may be below the venue's minimum share count"
            );
        }

        // Import failures are logged, not fatal: the market may already exist
        if let Err(e) = self.import_market(&intent.condition_id).await {
            tracing::debug!(error = %e, "Market import skipped");
        }

        let response = self.submit_trade(intent).await?;
        tracing::info!(
            market = %intent.slug,
            side = intent.side.as_str(),
            amount_usd = %intent.amount_usd,
            response = %response,
            "Trade submitted"
        );
        Ok(response)
    }
}

/// Build the order payload the broker expects
fn trade_payload(intent: &TradeIntent) -> serde_json::Value {
    serde_json::json!({
        "market_id": intent.condition_id,
        "side": intent.side.as_str(),
        "amount_usd": intent.amount_usd,
        "venue": TRADE_VENUE,
        "source": TRADE_SOURCE,
    })
}
