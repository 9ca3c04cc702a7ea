//! Price signal module
//!
//! Computes a directional momentum signal for the traded asset from a
//! reference exchange. The default provider reads one-minute candles from
//! Binance; a degraded CoinGecko provider reports spot price only. A missing
//! signal (`None`) always means "skip this cycle", never zero momentum.

mod binance;
mod coingecko;

pub use binance::BinanceProvider;
pub use coingecko::CoinGeckoProvider;

use crate::config::{Asset, SignalSource};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Coarse direction classification of the momentum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Positive momentum over the lookback window
    Up,
    /// Zero or negative momentum
    Down,
    /// No historical window available (spot-only provider)
    Neutral,
}

/// One OHLCV interval from the reference exchange
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Momentum computed over the lookback window, rebuilt fresh each cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumSignal {
    /// Percentage price change across the window
    pub momentum_pct: Decimal,
    /// Direction classification
    pub direction: Direction,
    /// Close of the most recent candle (or spot price)
    pub price_now: Decimal,
    /// Open of the oldest candle (or spot price)
    pub price_then: Decimal,
    /// Average traded volume across the window
    pub avg_volume: Decimal,
    /// Volume of the most recent candle
    pub latest_volume: Decimal,
    /// latest_volume / avg_volume, exactly 1 when the average is zero
    pub volume_ratio: Decimal,
    /// Number of candles behind the calculation (0 for spot-only)
    pub candles: usize,
}

impl MomentumSignal {
    /// Compute momentum from a candle window.
    ///
    /// Requires at least 2 candles; momentum is the percentage change from
    /// the open of the oldest candle to the close of the newest. Exactly
    /// zero momentum classifies as Down.
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        if candles.len() < 2 {
            return None;
        }

        let price_then = candles.first()?.open;
        let price_now = candles.last()?.close;
        if price_then.is_zero() {
            return None;
        }

        let momentum_pct = (price_now - price_then) / price_then * dec!(100);
        let direction = if momentum_pct > Decimal::ZERO {
            Direction::Up
        } else {
            Direction::Down
        };

        let total_volume: Decimal = candles.iter().map(|c| c.volume).sum();
        let avg_volume = total_volume / Decimal::from(candles.len());
        let latest_volume = candles.last()?.volume;
        let volume_ratio = if avg_volume > Decimal::ZERO {
            latest_volume / avg_volume
        } else {
            Decimal::ONE
        };

        Some(Self {
            momentum_pct,
            direction,
            price_now,
            price_then,
            avg_volume,
            latest_volume,
            volume_ratio,
            candles: candles.len(),
        })
    }

    /// Degraded spot-only signal: no window, no momentum, Neutral direction
    pub fn from_spot(price: Decimal) -> Self {
        Self {
            momentum_pct: Decimal::ZERO,
            direction: Direction::Neutral,
            price_now: price,
            price_then: price,
            avg_volume: Decimal::ZERO,
            latest_volume: Decimal::ZERO,
            volume_ratio: Decimal::ONE,
            candles: 0,
        }
    }
}

/// Trait for signal provider implementations
#[async_trait]
pub trait SignalProvider: Send + Sync {
    /// Fetch a fresh signal; None means the cycle should be skipped
    async fn fetch(&self, asset: Asset, lookback_minutes: u32) -> Option<MomentumSignal>;
}

/// Fetch a signal from the configured source
pub async fn fetch_signal(
    source: SignalSource,
    asset: Asset,
    lookback_minutes: u32,
) -> Option<MomentumSignal> {
    match source {
        SignalSource::Binance => {
            BinanceProvider::new().fetch(asset, lookback_minutes).await
        }
        SignalSource::Coingecko => {
            CoinGeckoProvider::new().fetch(asset, lookback_minutes).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: Decimal, close: Decimal, volume: Decimal) -> Candle {
        Candle {
            open,
            close,
            volume,
        }
    }

    #[test]
    fn test_momentum_formula() {
        // (100_500 - 100_000) / 100_000 * 100 = 0.5%
        let candles = vec![
            candle(dec!(100000), dec!(100100), dec!(10)),
            candle(dec!(100100), dec!(100500), dec!(10)),
        ];
        let signal = MomentumSignal::from_candles(&candles).unwrap();
        assert_eq!(signal.momentum_pct, dec!(0.5));
        assert_eq!(signal.direction, Direction::Up);
        assert_eq!(signal.price_then, dec!(100000));
        assert_eq!(signal.price_now, dec!(100500));
        assert_eq!(signal.candles, 2);
    }

    #[test]
    fn test_negative_momentum_is_down() {
        let candles = vec![
            candle(dec!(100000), dec!(99800), dec!(10)),
            candle(dec!(99800), dec!(99000), dec!(10)),
        ];
        let signal = MomentumSignal::from_candles(&candles).unwrap();
        assert_eq!(signal.momentum_pct, dec!(-1.0));
        assert_eq!(signal.direction, Direction::Down);
    }

    #[test]
    fn test_zero_momentum_classifies_as_down() {
        // M = 0 is not "> 0", so the boundary classifies as Down
        let candles = vec![
            candle(dec!(100000), dec!(100200), dec!(10)),
            candle(dec!(100200), dec!(100000), dec!(10)),
        ];
        let signal = MomentumSignal::from_candles(&candles).unwrap();
        assert_eq!(signal.momentum_pct, Decimal::ZERO);
        assert_eq!(signal.direction, Direction::Down);
    }

    #[test]
    fn test_volume_ratio() {
        let candles = vec![
            candle(dec!(100), dec!(101), dec!(5)),
            candle(dec!(101), dec!(102), dec!(15)),
        ];
        let signal = MomentumSignal::from_candles(&candles).unwrap();
        // avg = 10, latest = 15 -> ratio 1.5
        assert_eq!(signal.avg_volume, dec!(10));
        assert_eq!(signal.latest_volume, dec!(15));
        assert_eq!(signal.volume_ratio, dec!(1.5));
    }

    #[test]
    fn test_volume_ratio_zero_average_is_one() {
        let candles = vec![
            candle(dec!(100), dec!(101), dec!(0)),
            candle(dec!(101), dec!(102), dec!(0)),
        ];
        let signal = MomentumSignal::from_candles(&candles).unwrap();
        assert_eq!(signal.volume_ratio, Decimal::ONE);
    }

    #[test]
    fn test_insufficient_candles() {
        assert!(MomentumSignal::from_candles(&[]).is_none());
        let one = vec![candle(dec!(100), dec!(101), dec!(1))];
        assert!(MomentumSignal::from_candles(&one).is_none());
    }

    #[test]
    fn test_zero_open_price_rejected() {
        let candles = vec![
            candle(dec!(0), dec!(101), dec!(1)),
            candle(dec!(101), dec!(102), dec!(1)),
        ];
        assert!(MomentumSignal::from_candles(&candles).is_none());
    }

    #[test]
    fn test_spot_signal_is_neutral() {
        let signal = MomentumSignal::from_spot(dec!(97000));
        assert_eq!(signal.direction, Direction::Neutral);
        assert_eq!(signal.momentum_pct, Decimal::ZERO);
        assert_eq!(signal.price_now, dec!(97000));
        assert_eq!(signal.price_then, dec!(97000));
        assert_eq!(signal.volume_ratio, Decimal::ONE);
        assert_eq!(signal.candles, 0);
    }
}
