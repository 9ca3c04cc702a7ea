//! Decision engine
//!
//! Combines the selected market and the momentum signal into a sized trade
//! intent. Direction mapping: Up momentum buys, anything else sells — which
//! means the Neutral direction from the spot-only provider always maps to a
//! sell. That quirk is inherited from the strategy's first deployment and is
//! pinned by a test; change it deliberately or not at all.
//!
//! Candle-backed signals are gated on `min_momentum_pct`: a window move
//! smaller than the configured minimum produces no trade. Spot-only signals
//! carry no momentum to measure and bypass the gate. `entry_threshold`
//! remains a configuration surface with no effect here.

use crate::config::Settings;
use crate::execution::{TradeIntent, TradeSide};
use crate::market::CandidateMarket;
use crate::signal::{Direction, MomentumSignal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Minimum dollar amount after volume scaling
const MIN_TRADE_USD: Decimal = dec!(1);

/// Decide whether to trade this cycle and build the intent.
///
/// `amount` is the pre-sized dollar amount from the position sizer; volume
/// confidence may scale it down (floored at $1). Returns None when the
/// momentum gate filters the signal out.
pub fn decide(
    market: &CandidateMarket,
    signal: &MomentumSignal,
    settings: &Settings,
    amount: Decimal,
) -> Option<TradeIntent> {
    // Gate only applies to signals with a real window behind them
    if signal.candles >= 2 && signal.momentum_pct.abs() < settings.min_momentum_pct {
        tracing::info!(
            momentum_pct = %signal.momentum_pct,
            min = %settings.min_momentum_pct,
            "Momentum below threshold, no trade"
        );
        return None;
    }

    let side = match signal.direction {
        Direction::Up => TradeSide::Buy,
        Direction::Down | Direction::Neutral => TradeSide::Sell,
    };

    let amount_usd = if settings.volume_confidence && signal.volume_ratio < Decimal::ONE {
        (amount * signal.volume_ratio).max(MIN_TRADE_USD)
    } else {
        amount
    };

    Some(TradeIntent {
        condition_id: market.condition_id.clone(),
        slug: market.slug.clone(),
        question: market.question.clone(),
        side,
        amount_usd,
    })
}
