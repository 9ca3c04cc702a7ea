//! CoinGecko spot-price fallback provider
//!
//! The free tier exposes no candle history, so this provider can only report
//! the current price: momentum is always zero and direction Neutral. Useful
//! when Binance is unreachable, at the cost of disabling momentum-based
//! decisions while selected.

use super::{MomentumSignal, SignalProvider};
use crate::config::Asset;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// CoinGecko API base URL
const COINGECKO_API_URL: &str = "https://api.coingecko.com";

/// Spot-only signal provider backed by CoinGecko's simple price endpoint
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

/// Per-coin price entry in the simple price response
#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<Decimal>,
}

impl CoinGeckoProvider {
    /// Create a provider against the public CoinGecko host
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_API_URL.to_string())
    }

    /// Create a provider against a custom host (tests)
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("fastloop/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    async fn fetch_spot(&self, coin_id: &str) -> anyhow::Result<Option<Decimal>> {
        let url = format!("{}/api/v3/simple/price", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", coin_id), ("vs_currencies", "usd")])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("simple price request failed: {}", response.status());
        }

        let prices: HashMap<String, SimplePrice> = response.json().await?;
        Ok(prices.get(coin_id).and_then(|p| p.usd))
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalProvider for CoinGeckoProvider {
    async fn fetch(&self, asset: Asset, _lookback_minutes: u32) -> Option<MomentumSignal> {
        let coin_id = asset.coingecko_id();

        match self.fetch_spot(coin_id).await {
            Ok(Some(price)) => Some(MomentumSignal::from_spot(price)),
            Ok(None) => {
                tracing::warn!(coin_id, "CoinGecko response missing price");
                None
            }
            Err(e) => {
                tracing::warn!(coin_id, error = %e, "CoinGecko fetch failed, no signal this cycle");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Direction;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_price_deserialize() {
        let json = r#"{"bitcoin": {"usd": 97123.45}}"#;
        let prices: HashMap<String, SimplePrice> = serde_json::from_str(json).unwrap();
        assert_eq!(prices["bitcoin"].usd, Some(dec!(97123.45)));
    }

    #[test]
    fn test_simple_price_missing_currency() {
        let json = r#"{"bitcoin": {}}"#;
        let prices: HashMap<String, SimplePrice> = serde_json::from_str(json).unwrap();
        assert_eq!(prices["bitcoin"].usd, None);
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_no_signal() {
        let provider = CoinGeckoProvider::with_base_url("http://127.0.0.1:1".to_string());
        assert!(provider.fetch(Asset::Btc, 5).await.is_none());
    }

    #[test]
    fn test_spot_signal_shape() {
        // What the provider hands back on success
        let signal = MomentumSignal::from_spot(dec!(97000));
        assert_eq!(signal.direction, Direction::Neutral);
        assert_eq!(signal.candles, 0);
    }
}
