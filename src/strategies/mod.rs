// src/strategies/mod.rs
pub mod crossover;
pub mod momentum;
pub mod threshold;
pub mod traits;
pub mod vwap;

pub use crossover::MovingAverageCrossover;
pub use momentum::Momentum;
pub use threshold::Threshold;
pub use traits::{Evaluator, MarketView};
pub use vwap::Vwap;

use crate::config::StrategyConfig;

/// The standard four-evaluator panel.
pub fn default_panel(cfg: &StrategyConfig) -> Vec<Box<dyn Evaluator>> {
    vec![
        Box::new(MovingAverageCrossover),
        Box::new(Momentum::new(cfg.momentum_window)),
        Box::new(Threshold::new(cfg.buy_threshold, cfg.sell_threshold)),
        Box::new(Vwap),
    ]
}
