// src/config.rs

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StrategyConfig {
    /// Relative drop from the last buy price that triggers accumulation (e.g. -0.02).
    pub buy_threshold: Decimal,
    /// Relative rise from the last buy price that triggers an exit (e.g. 0.03).
    pub sell_threshold: Decimal,
    pub short_window: usize,
    pub long_window: usize,
    pub price_window: usize,
    pub momentum_window: usize,
    pub buy_quorum: usize,
    pub sell_quorum: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            buy_threshold: Decimal::new(-2, 2),
            sell_threshold: Decimal::new(3, 2),
            short_window: 10,
            long_window: 20,
            price_window: 100,
            momentum_window: 20,
            buy_quorum: 2,
            sell_quorum: 1,
        }
    }
}

/// Knobs for the simulated random-walk feed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub start_price: Decimal,
    /// Full width of a single random step as a fraction of price (0.02 = up to +/-1%).
    pub max_step_pct: f64,
    pub update_ms: u64,
    pub latency_ms: u64,
    pub tick_size: Decimal,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            start_price: Decimal::from(150),
            max_step_pct: 0.02,
            update_ms: 1000,
            latency_ms: 100,
            tick_size: Decimal::new(1, 2),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub symbol: String,
    pub initial_balance: Decimal,
    pub tick_period_ms: u64,
    pub fetch_timeout_ms: u64,
    pub auto_start: bool,
    pub strategy: StrategyConfig,
    pub feed: FeedConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            initial_balance: Decimal::from(10_000),
            tick_period_ms: 1000,
            fetch_timeout_ms: 500,
            auto_start: false,
            strategy: StrategyConfig::default(),
            feed: FeedConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `Settings.{toml,yaml,json}` if present, then `APP_*` environment overrides
    /// (nested keys use `__`, e.g. `APP_STRATEGY__BUY_THRESHOLD`).
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("Settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.strategy;
        // finest tick the feed snaps to; smaller ones overflow `Decimal` division
        let min_tick = Decimal::new(1, 8);
        let problem = if self.initial_balance <= Decimal::ZERO {
            Some("initial_balance must be positive")
        } else if self.symbol.trim().is_empty() {
            Some("symbol must not be empty")
        } else if self.tick_period_ms == 0 {
            Some("tick_period_ms must be positive")
        } else if s.short_window == 0 || s.long_window == 0 || s.price_window == 0 {
            Some("window sizes must be positive")
        } else if s.short_window >= s.long_window {
            Some("short_window must be smaller than long_window")
        } else if s.momentum_window == 0 || s.momentum_window > s.price_window {
            Some("momentum_window must be within 1..=price_window")
        } else if s.buy_quorum == 0 || s.sell_quorum == 0 {
            Some("quorums must be at least 1")
        } else if self.feed.start_price <= Decimal::ZERO {
            Some("feed.start_price must be positive")
        } else if self.feed.tick_size < min_tick || self.feed.tick_size > self.feed.start_price {
            Some("feed.tick_size must be within 0.00000001..=start_price")
        } else {
            None
        };

        match problem {
            Some(msg) => Err(ConfigError::Message(msg.to_string())),
            None => Ok(()),
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
