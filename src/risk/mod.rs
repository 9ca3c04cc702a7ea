//! Position sizing
//!
//! Trade size is bounded by the configured absolute cap and, when smart
//! sizing is on, by a fixed fraction of live portfolio balance — whichever
//! is smaller.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fraction of portfolio balance per trade when smart sizing is enabled
pub const SMART_SIZING_PCT: Decimal = dec!(0.05);

/// Compute the dollar size for one trade.
///
/// With smart sizing off the size is always `max_position`. With it on, an
/// unavailable or non-positive balance falls back to `max_position`;
/// otherwise the size is the lesser of `max_position` and 5% of balance.
pub fn size(balance: Option<Decimal>, max_position: Decimal, smart_sizing: bool) -> Decimal {
    if !smart_sizing {
        return max_position;
    }

    match balance {
        Some(b) if b > Decimal::ZERO => max_position.min(b * SMART_SIZING_PCT),
        _ => max_position,
    }
}
