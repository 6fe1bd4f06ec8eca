// src/strategies/traits.rs
use crate::core::history::PriceHistory;
use crate::error::TradeError;
use crate::types::Opinion;
use rust_decimal::Decimal;

/// Everything an evaluator may look at on a given tick.
#[derive(Debug, Clone, Copy)]
pub struct MarketView<'a> {
    pub history: &'a PriceHistory,
    pub price: Decimal,
    /// Price observed on the previous completed tick, `None` on the first one.
    pub previous_price: Option<Decimal>,
    pub last_buy_price: Option<Decimal>,
    /// Whether the last completed trade was a buy.
    pub holding: bool,
}

pub trait Evaluator: Send + Sync {
    fn name(&self) -> &'static str;

    // Err(InsufficientData) means "not actionable yet" and is counted as Abstain.
    fn evaluate(&self, view: &MarketView<'_>) -> Result<Opinion, TradeError>;
}

/// Shared gating for the trend-style evaluators: only buy when flat, only sell when holding.
pub(crate) fn directional(above: bool, below: bool, holding: bool) -> Opinion {
    if above && !holding {
        Opinion::Buy
    } else if below && holding {
        Opinion::Sell
    } else {
        Opinion::Abstain
    }
}
