//! Binance candle-based momentum provider
//!
//! Fetches the most recent one-minute klines over REST and derives momentum
//! and volume confidence from them. Binance exposes several equivalent API
//! hosts; a failed or rate-limited request fails over to the next host
//! rather than retrying the same one.

use super::{Candle, MomentumSignal, SignalProvider};
use crate::config::Asset;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

/// Equivalent Binance REST hosts, tried in order
const BINANCE_BASE_URLS: [&str; 3] = [
    "https://api.binance.com",
    "https://api1.binance.com",
    "https://api3.binance.com",
];

/// Candle-based signal provider backed by Binance klines
pub struct BinanceProvider {
    client: Client,
    base_urls: Vec<String>,
}

impl BinanceProvider {
    /// Create a provider against the public Binance hosts
    pub fn new() -> Self {
        Self::with_base_urls(BINANCE_BASE_URLS.iter().map(|s| s.to_string()).collect())
    }

    /// Create a provider against custom hosts (tests, proxies)
    pub fn with_base_urls(base_urls: Vec<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("fastloop/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_urls }
    }

    /// Fetch `limit` one-minute candles from a single host
    async fn fetch_klines(
        &self,
        base: &str,
        symbol: &str,
        limit: u32,
    ) -> anyhow::Result<Vec<Candle>> {
        let url = format!("{}/api/v3/klines", base);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", "1m"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        if response.status().as_u16() == 429 {
            anyhow::bail!("rate limited by {}", base);
        }
        if !response.status().is_success() {
            anyhow::bail!("kline request failed: {}", response.status());
        }

        let rows: Vec<Vec<serde_json::Value>> = response.json().await?;
        let candles: Vec<Candle> = rows.iter().filter_map(|row| parse_kline_row(row)).collect();

        if candles.len() != rows.len() {
            anyhow::bail!("malformed kline rows from {}", base);
        }
        Ok(candles)
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalProvider for BinanceProvider {
    async fn fetch(&self, asset: Asset, lookback_minutes: u32) -> Option<MomentumSignal> {
        let symbol = asset.binance_symbol();

        for base in &self.base_urls {
            match self.fetch_klines(base, symbol, lookback_minutes).await {
                Ok(candles) => {
                    if let Some(signal) = MomentumSignal::from_candles(&candles) {
                        return Some(signal);
                    }
                    tracing::warn!(base = %base, candles = candles.len(), "Too few candles, trying next host");
                }
                Err(e) => {
                    tracing::warn!(base = %base, error = %e, "Kline fetch failed, trying next host");
                }
            }
        }

        tracing::warn!(symbol, "All Binance hosts failed, no signal this cycle");
        None
    }
}

/// Decode one kline row.
///
/// Binance returns each kline as a positional array:
/// [openTime, open, high, low, close, volume, ...] with the numeric fields
/// string-encoded.
fn parse_kline_row(row: &[serde_json::Value]) -> Option<Candle> {
    let field = |idx: usize| -> Option<Decimal> {
        Decimal::from_str(row.get(idx)?.as_str()?).ok()
    };

    Some(Candle {
        open: field(1)?,
        close: field(4)?,
        volume: field(5)?,
    })
}
