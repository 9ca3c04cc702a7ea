//! Gamma API client for fast-market discovery
//!
//! Queries Polymarket's Gamma API for open crypto markets and filters them
//! down to the configured asset's up/down fast markets for one window
//! duration. Settlement times come from the question text, not the API.

use super::{parse_expiry, CandidateMarket};
use crate::config::Asset;
use chrono::{Datelike, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Gamma API base URL
pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// Configuration for the Gamma client
#[derive(Debug, Clone)]
pub struct GammaConfig {
    /// Base URL for the Gamma API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Listing page size
    pub limit: u32,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            base_url: GAMMA_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            limit: 20,
        }
    }
}

/// Client for Polymarket's Gamma API
pub struct GammaClient {
    config: GammaConfig,
    client: Client,
}

impl GammaClient {
    /// Create a new Gamma API client with default configuration
    pub fn new() -> Self {
        Self::with_config(GammaConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: GammaConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent("fastloop/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Discover open fast markets for an asset and window duration.
    ///
    /// Markets whose expiry cannot be parsed from the question are still
    /// returned (with `end_time: None`) but can never be selected.
    pub async fn discover(&self, asset: Asset, window: &str) -> anyhow::Result<Vec<CandidateMarket>> {
        let url = format!("{}/markets", self.config.base_url);

        tracing::debug!(url = %url, asset = ?asset, window, "Fetching fast markets from Gamma API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", self.config.limit.to_string().as_str()),
                ("closed", "false"),
                ("tag", "crypto"),
                ("order", "createdAt"),
                ("ascending", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gamma API error: {} - {}", status, body);
        }

        let raw: Vec<GammaMarket> = response.json().await?;
        let year = Utc::now().year();
        let markets: Vec<CandidateMarket> = raw
            .into_iter()
            .filter(|m| m.matches(asset, window))
            .map(|m| m.into_candidate(year))
            .collect();

        tracing::debug!(count = markets.len(), "Matching fast markets");
        Ok(markets)
    }
}

impl Default for GammaClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw market response from Gamma API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GammaMarket {
    question: Option<String>,
    slug: Option<String>,
    condition_id: Option<String>,
    #[serde(default)]
    closed: bool,
    /// Outcome labels as a JSON-encoded string array
    outcomes: Option<String>,
    /// Outcome prices as a JSON-encoded string array
    outcome_prices: Option<String>,
    /// Fee rate; arrives as number or string depending on endpoint version
    #[serde(alias = "fee_rate_bps")]
    fee_rate_bps: Option<serde_json::Value>,
}

impl GammaMarket {
    /// Asset pattern must appear in the question and the slug must carry the
    /// window tag (e.g. "-5m-")
    fn matches(&self, asset: Asset, window: &str) -> bool {
        let question = self.question.as_deref().unwrap_or_default().to_lowercase();
        let slug = self.slug.as_deref().unwrap_or_default();

        !self.closed
            && !slug.is_empty()
            && question.contains(asset.question_pattern())
            && slug.contains(&format!("-{}-", window))
    }

    fn into_candidate(self, year: i32) -> CandidateMarket {
        let question = self.question.unwrap_or_default();
        let end_time = parse_expiry(&question, year);

        CandidateMarket {
            end_time,
            question,
            slug: self.slug.unwrap_or_default(),
            condition_id: self.condition_id.unwrap_or_default(),
            outcomes: parse_string_array(self.outcomes.as_deref()),
            outcome_prices: parse_price_array(self.outcome_prices.as_deref()),
            fee_rate_bps: parse_fee_bps(self.fee_rate_bps.as_ref()),
        }
    }
}

/// Parse a JSON-encoded string array field, e.g. "[\"Up\", \"Down\"]"
fn parse_string_array(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

/// Parse outcome prices, e.g. "[\"0.52\", \"0.48\"]"; malformed input is empty
fn parse_price_array(raw: Option<&str>) -> Vec<Decimal> {
    parse_string_array(raw)
        .iter()
        .filter_map(|p| Decimal::from_str(p).ok())
        .collect()
}

/// Fee basis points arrive as a JSON number or a numeric string
fn parse_fee_bps(raw: Option<&serde_json::Value>) -> u32 {
    match raw {
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0) as u32,
        Some(serde_json::Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}
