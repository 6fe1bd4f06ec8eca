// src/utils/precision.rs
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Snaps a price to the nearest multiple of `tick_size`, never below one tick.
/// Example: price=100.166, tick=0.01 -> 100.17
pub fn snap_to_tick(price: Decimal, tick_size: Decimal) -> Decimal {
    if tick_size <= Decimal::ZERO {
        return price;
    }
    ((price / tick_size).round() * tick_size).max(tick_size)
}

/// Converts a raw float price (from the random walk) into a tick-aligned decimal.
pub fn price_from_f64(raw: f64, tick_size: Decimal) -> Option<Decimal> {
    Decimal::from_f64(raw).map(|p| snap_to_tick(p, tick_size))
}

/// Arithmetic mean of a sequence of prices. `None` when empty.
pub fn mean<'a, I>(prices: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Decimal>,
{
    let (sum, count) = prices
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, n), p| (sum + *p, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}
