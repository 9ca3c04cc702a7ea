//! Trade execution module
//!
//! A `TradeIntent` is either reported (dry run) or submitted to the Simmer
//! brokerage API (live). The executor returns the broker's raw JSON response
//! verbatim; interpreting fill status is left to the operator reading output.

mod simmer;

pub use simmer::{SimmerClient, SimmerPosition};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Venue tag attached to every order
pub const TRADE_VENUE: &str = "polymarket";

/// Source tag identifying this strategy to the broker
pub const TRADE_SOURCE: &str = "sdk:fastloop";

/// Polymarket minimum share count per order; dollar amounts below this are
/// likely to be rejected since shares cost at most $1
pub const MIN_SHARES_PER_ORDER: u32 = 5;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

/// A sized, directional trade for one market — built fresh each cycle,
/// never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeIntent {
    /// Market condition identifier
    pub condition_id: String,
    /// Market slug (for operator-readable output)
    pub slug: String,
    /// Market question text
    pub question: String,
    /// Trade direction
    pub side: TradeSide,
    /// Dollar amount
    pub amount_usd: Decimal,
}

/// Trait for trade executor implementations
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute (or report) a trade intent; returns the broker response
    async fn execute(&self, intent: &TradeIntent) -> anyhow::Result<serde_json::Value>;
}

/// Dry-run executor: reports the would-be trade and performs no network call
#[derive(Default)]
pub struct DryRunExecutor {
    reported: Arc<RwLock<Vec<TradeIntent>>>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intents reported so far (test inspection)
    pub async fn reported(&self) -> Vec<TradeIntent> {
        self.reported.read().await.clone()
    }
}

#[async_trait]
impl Executor for DryRunExecutor {
    async fn execute(&self, intent: &TradeIntent) -> anyhow::Result<serde_json::Value> {
        tracing::info!(
            market = %intent.slug,
            side = intent.side.as_str(),
            amount_usd = %intent.amount_usd,
            "[DRY RUN] Would trade"
        );

        let mut reported = self.reported.write().await;
        reported.push(intent.clone());

        Ok(serde_json::json!({
            "dry_run": true,
            "market_id": intent.condition_id,
            "side": intent.side.as_str(),
            "amount_usd": intent.amount_usd,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_intent() -> TradeIntent {
        TradeIntent {
            condition_id: "0xabc".to_string(),
            slug: "bitcoin-up-or-down-5m-test".to_string(),
            question: "Bitcoin Up or Down - February 15, 5:30AM-5:35AM ET".to_string(),
            side: TradeSide::Buy,
            amount_usd: dec!(5),
        }
    }

    #[test]
    fn test_trade_side_as_str() {
        assert_eq!(TradeSide::Buy.as_str(), "buy");
        assert_eq!(TradeSide::Sell.as_str(), "sell");
    }

    #[tokio::test]
    async fn test_dry_run_records_and_acknowledges() {
        let executor = DryRunExecutor::new();
        let intent = sample_intent();

        let response = executor.execute(&intent).await.unwrap();
        assert_eq!(response["dry_run"], serde_json::json!(true));
        assert_eq!(response["market_id"], serde_json::json!("0xabc"));
        assert_eq!(response["side"], serde_json::json!("buy"));

        let reported = executor.reported().await;
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].condition_id, "0xabc");
        assert_eq!(reported[0].amount_usd, dec!(5));
    }

    #[tokio::test]
    async fn test_dry_run_multiple_intents() {
        let executor = DryRunExecutor::new();
        executor.execute(&sample_intent()).await.unwrap();

        let mut second = sample_intent();
        second.side = TradeSide::Sell;
        executor.execute(&second).await.unwrap();

        let reported = executor.reported().await;
        assert_eq!(reported.len(), 2);
        assert_eq!(reported[1].side, TradeSide::Sell);
    }
}
