// src/strategies/threshold.rs
use crate::error::TradeError;
use crate::strategies::traits::{Evaluator, MarketView};
use crate::types::Opinion;
use rust_decimal::Decimal;
use tracing::debug;

/// Percentage move relative to the last buy price.
///
/// Buys the dip once the price has fallen `buy_threshold` (negative) below the
/// reference, sells once it has risen `sell_threshold` above it. Abstains while
/// no reference price exists.
#[derive(Debug, Clone)]
pub struct Threshold {
    buy_threshold: Decimal,
    sell_threshold: Decimal,
}

impl Threshold {
    pub fn new(buy_threshold: Decimal, sell_threshold: Decimal) -> Self {
        Self {
            buy_threshold,
            sell_threshold,
        }
    }
}

impl Evaluator for Threshold {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn evaluate(&self, view: &MarketView<'_>) -> Result<Opinion, TradeError> {
        let reference = match view.last_buy_price {
            Some(p) if !p.is_zero() => p,
            _ => return Ok(Opinion::Abstain),
        };

        let change = (view.price - reference) / reference;
        debug!(%reference, %change, "threshold");

        Ok(if change <= self.buy_threshold {
            Opinion::Buy
        } else if change >= self.sell_threshold {
            Opinion::Sell
        } else {
            Opinion::Abstain
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::PriceHistory;
    use rust_decimal_macros::dec;

    fn eval(price: Decimal, last_buy: Option<Decimal>) -> Opinion {
        let h = PriceHistory::new(100, 10, 20);
        let view = MarketView {
            history: &h,
            price,
            previous_price: None,
            last_buy_price: last_buy,
            holding: false,
        };
        Threshold::new(dec!(-0.02), dec!(0.03)).evaluate(&view).unwrap()
    }

    #[test]
    fn abstains_without_reference() {
        assert_eq!(eval(dec!(50), None), Opinion::Abstain);
    }

    #[test]
    fn two_percent_drop_is_inclusive() {
        assert_eq!(eval(dec!(98), Some(dec!(100))), Opinion::Buy);
        assert_eq!(eval(dec!(98.01), Some(dec!(100))), Opinion::Abstain);
    }

    #[test]
    fn three_percent_rise_sells() {
        assert_eq!(eval(dec!(103), Some(dec!(100))), Opinion::Sell);
        assert_eq!(eval(dec!(100), Some(dec!(97))), Opinion::Sell);
        assert_eq!(eval(dec!(102.99), Some(dec!(100))), Opinion::Abstain);
    }
}
