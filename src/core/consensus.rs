// src/core/consensus.rs
use crate::config::StrategyConfig;
use crate::error::TradeError;
use crate::strategies::{Evaluator, MarketView};
use crate::types::Opinion;
use tracing::{debug, warn};

/// What the panel decided for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub buys: usize,
    pub sells: usize,
}

/// Asymmetric quorum: entering needs more agreement than exiting.
#[derive(Debug, Clone, Copy)]
pub struct Consensus {
    buy_quorum: usize,
    sell_quorum: usize,
}

impl Consensus {
    pub fn new(buy_quorum: usize, sell_quorum: usize) -> Self {
        Self {
            buy_quorum,
            sell_quorum,
        }
    }

    pub fn from_config(cfg: &StrategyConfig) -> Self {
        Self::new(cfg.buy_quorum, cfg.sell_quorum)
    }

    /// Polls every evaluator once. Missing data counts as abstention.
    pub fn tally(&self, panel: &[Box<dyn Evaluator>], view: &MarketView<'_>) -> Tally {
        panel.iter().fold(Tally::default(), |mut tally, evaluator| {
            let opinion = match evaluator.evaluate(view) {
                Ok(opinion) => opinion,
                Err(TradeError::InsufficientData { have, need }) => {
                    debug!(evaluator = evaluator.name(), have, need, "warming up");
                    Opinion::Abstain
                }
                Err(e) => {
                    warn!(evaluator = evaluator.name(), error = %e, "evaluator failed");
                    Opinion::Abstain
                }
            };
            debug!(evaluator = evaluator.name(), ?opinion);

            match opinion {
                Opinion::Buy => tally.buys += 1,
                Opinion::Sell => tally.sells += 1,
                Opinion::Abstain => {}
            }
            tally
        })
    }

    /// Buy takes precedence; only one action per tick.
    pub fn decide(&self, tally: Tally, can_afford: bool, has_positions: bool) -> Decision {
        if tally.buys >= self.buy_quorum && can_afford {
            Decision::Buy
        } else if tally.sells >= self.sell_quorum && has_positions {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }
}

impl Default for Consensus {
    fn default() -> Self {
        Self::new(2, 1)
    }
}
