// src/strategies/crossover.rs
use crate::core::history::WindowKind;
use crate::error::TradeError;
use crate::strategies::traits::{directional, Evaluator, MarketView};
use crate::types::Opinion;
use tracing::debug;

/// Short vs. long moving average. Silent until both windows are full.
#[derive(Debug, Default, Clone)]
pub struct MovingAverageCrossover;

impl Evaluator for MovingAverageCrossover {
    fn name(&self) -> &'static str {
        "ma_crossover"
    }

    fn evaluate(&self, view: &MarketView<'_>) -> Result<Opinion, TradeError> {
        let short = view.history.average(WindowKind::Short)?;
        let long = view.history.average(WindowKind::Long)?;
        debug!(%short, %long, "MA crossover");

        Ok(directional(short > long, short < long, view.holding))
    }
}
