// src/connectors/simulated.rs
use crate::config::FeedConfig;
use crate::connectors::traits::PriceSource;
use crate::types::PriceSample;
use crate::utils::precision::{price_from_f64, snap_to_tick};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug)]
struct FeedState {
    /// Last price produced by the walk, used for symbols we have never quoted.
    global: Decimal,
    by_symbol: HashMap<String, Decimal>,
}

/// Random-walk ticker with simulated quote latency.
pub struct SimulatedFeed {
    cfg: FeedConfig,
    state: RwLock<FeedState>,
}

impl SimulatedFeed {
    pub fn new(cfg: FeedConfig) -> Self {
        let start = snap_to_tick(cfg.start_price, cfg.tick_size);
        Self {
            cfg,
            state: RwLock::new(FeedState {
                global: start,
                by_symbol: HashMap::new(),
            }),
        }
    }

    /// One step of the walk. `shock` is uniform in [0, 1); the move is
    /// `(shock - 0.5) * max_step_pct * price`, floored at one tick.
    pub fn step(current: Decimal, shock: f64, max_step_pct: f64, tick_size: Decimal) -> Decimal {
        let Some(price) = current.to_f64() else {
            return current;
        };
        let next = (price + (shock - 0.5) * max_step_pct * price).max(0.0);
        price_from_f64(next, tick_size).unwrap_or(current)
    }

    /// Applies one step and publishes the result for `symbol`.
    pub async fn advance(&self, symbol: &str, shock: f64) -> Decimal {
        let mut state = self.state.write().await;
        let next = Self::step(state.global, shock, self.cfg.max_step_pct, self.cfg.tick_size);
        state.global = next;
        state.by_symbol.insert(symbol.to_string(), next);
        next
    }

    /// Starts the background ticker for `symbol`.
    pub fn spawn(self: &Arc<Self>, symbol: String) -> JoinHandle<()> {
        let feed = Arc::clone(self);
        let period = Duration::from_millis(feed.cfg.update_ms.max(1));
        info!("Starting simulated feed for {} every {:?}", symbol, period);

        tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let shock: f64 = rng.gen();
                let price = feed.advance(&symbol, shock).await;
                debug!("New mock price for {}: ${:.2}", symbol, price);
            }
        })
    }
}

#[async_trait]
impl PriceSource for SimulatedFeed {
    async fn fetch(&self, symbol: &str) -> Result<PriceSample> {
        if self.cfg.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.cfg.latency_ms)).await;
        }
        let state = self.state.read().await;
        let price = state
            .by_symbol
            .get(symbol)
            .copied()
            .unwrap_or(state.global);

        Ok(PriceSample {
            symbol: symbol.to_string(),
            price,
            timestamp: Utc::now(),
        })
    }
}
