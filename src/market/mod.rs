//! Market discovery module
//!
//! Finds active fast (5m/15m) crypto up/down markets via the Gamma API and
//! selects the best candidate for the current cycle.

mod expiry;
mod gamma;

pub use expiry::parse_expiry;
pub use gamma::{GammaClient, GammaConfig, GAMMA_API_URL};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One discovered fast market, rebuilt fresh each cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMarket {
    /// Human-readable question text
    pub question: String,
    /// Identifying slug (carries the window tag, e.g. "-5m-")
    pub slug: String,
    /// Condition identifier used for trading
    pub condition_id: String,
    /// Window end time parsed from the question; None when unparsable
    pub end_time: Option<DateTime<Utc>>,
    /// Outcome labels (typically ["Up", "Down"])
    pub outcomes: Vec<String>,
    /// Current outcome prices, same order as `outcomes`
    pub outcome_prices: Vec<Decimal>,
    /// Market fee rate in basis points
    pub fee_rate_bps: u32,
}

impl CandidateMarket {
    /// Seconds until settlement, None when the expiry was unparsable
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        self.end_time.map(|end| (end - now).num_seconds())
    }
}

/// Pick the market to trade this cycle: soonest expiring among those with
/// more than `min_remaining_secs` of lifetime left.
///
/// Markets with an unparsable expiry are never selectable. Returns None when
/// nothing qualifies.
pub fn select_best(
    markets: &[CandidateMarket],
    min_remaining_secs: i64,
    now: DateTime<Utc>,
) -> Option<&CandidateMarket> {
    markets
        .iter()
        .filter_map(|m| {
            let remaining = m.remaining_secs(now)?;
            (remaining > min_remaining_secs).then_some((remaining, m))
        })
        .min_by_key(|(remaining, _)| *remaining)
        .map(|(_, m)| m)
}
