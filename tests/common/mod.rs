#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use paper_trader::config::AppConfig;
use paper_trader::connectors::PriceSource;
use paper_trader::core::TradingEngine;
use paper_trader::types::PriceSample;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays a fixed list of prices, then keeps quoting the last one.
pub struct ScriptedSource {
    queue: Mutex<VecDeque<Decimal>>,
    last: Mutex<Decimal>,
}

impl ScriptedSource {
    pub fn new(prices: &[Decimal]) -> Self {
        Self {
            queue: Mutex::new(prices.iter().copied().collect()),
            last: Mutex::new(prices.first().copied().unwrap_or(Decimal::ONE)),
        }
    }

    pub fn push(&self, price: Decimal) {
        self.queue.lock().unwrap().push_back(price);
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch(&self, symbol: &str) -> anyhow::Result<PriceSample> {
        let next = self.queue.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(p) = next {
            *last = p;
        }
        Ok(PriceSample {
            symbol: symbol.to_string(),
            price: *last,
            timestamp: Utc::now(),
        })
    }
}

pub fn config_with_balance(balance: Decimal) -> AppConfig {
    AppConfig {
        initial_balance: balance,
        ..AppConfig::default()
    }
}

pub fn engine_with(
    config: &AppConfig,
    prices: &[Decimal],
) -> (Arc<TradingEngine>, Arc<ScriptedSource>) {
    let source = Arc::new(ScriptedSource::new(prices));
    let engine = Arc::new(TradingEngine::new(config, source.clone()));
    (engine, source)
}
