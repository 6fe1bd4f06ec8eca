// src/strategies/momentum.rs
use crate::error::TradeError;
use crate::strategies::traits::{directional, Evaluator, MarketView};
use crate::types::Opinion;
use tracing::debug;

/// Previous tick's price against the mean of the last `lookback` raw samples,
/// gated on trade posture rather than absolute direction.
#[derive(Debug, Clone)]
pub struct Momentum {
    lookback: usize,
}

impl Momentum {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }
}

impl Evaluator for Momentum {
    fn name(&self) -> &'static str {
        "momentum"
    }

    fn evaluate(&self, view: &MarketView<'_>) -> Result<Opinion, TradeError> {
        let avg = view.history.tail_mean(self.lookback)?;
        let Some(previous) = view.previous_price else {
            return Ok(Opinion::Abstain);
        };
        debug!(%previous, %avg, "momentum");

        Ok(directional(previous > avg, previous < avg, view.holding))
    }
}
