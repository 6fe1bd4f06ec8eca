// src/strategies/vwap.rs
use crate::error::TradeError;
use crate::strategies::traits::{directional, Evaluator, MarketView};
use crate::types::Opinion;
use tracing::debug;

/// Mean reversion around the unit-volume VWAP of the raw window.
#[derive(Debug, Default, Clone)]
pub struct Vwap;

impl Evaluator for Vwap {
    fn name(&self) -> &'static str {
        "vwap"
    }

    fn evaluate(&self, view: &MarketView<'_>) -> Result<Opinion, TradeError> {
        let vwap = view.history.vwap()?;
        debug!(price = %view.price, %vwap, "vwap");

        // cheap vs. VWAP is a buy, rich is a sell
        Ok(directional(view.price < vwap, view.price > vwap, view.holding))
    }
}
