// src/core/engine.rs
use crate::config::AppConfig;
use crate::connectors::traits::PriceSource;
use crate::core::consensus::{Consensus, Decision};
use crate::core::history::PriceHistory;
use crate::core::ledger::Portfolio;
use crate::error::TradeError;
use crate::strategies::{self, Evaluator, MarketView};
use crate::types::{CycleOutcome, PerformanceReport, PriceSample, StatusSnapshot};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Everything a decision cycle mutates. Guarded by one lock so readers always
/// see a consistent point in time.
#[derive(Debug)]
struct TraderState {
    history: PriceHistory,
    portfolio: Portfolio,
}

pub struct TradingEngine {
    symbol: String,
    fetch_timeout: Duration,
    source: Arc<dyn PriceSource>,
    panel: Vec<Box<dyn Evaluator>>,
    consensus: Consensus,
    state: Mutex<TraderState>,
    cycles: AtomicU64,
}

impl TradingEngine {
    pub fn new(config: &AppConfig, source: Arc<dyn PriceSource>) -> Self {
        Self::with_panel(config, source, strategies::default_panel(&config.strategy))
    }

    pub fn with_panel(
        config: &AppConfig,
        source: Arc<dyn PriceSource>,
        panel: Vec<Box<dyn Evaluator>>,
    ) -> Self {
        let s = &config.strategy;
        Self {
            symbol: config.symbol.clone(),
            fetch_timeout: config.fetch_timeout(),
            source,
            panel,
            consensus: Consensus::from_config(s),
            state: Mutex::new(TraderState {
                history: PriceHistory::new(s.price_window, s.short_window, s.long_window),
                portfolio: Portfolio::new(config.initial_balance),
            }),
            cycles: AtomicU64::new(0),
        }
    }

    /// Number of decision cycles attempted, including failed ones.
    pub fn cycle_count(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    /// Fetches one price and runs evaluators, consensus and the ledger end to end.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, TradeError> {
        self.cycles.fetch_add(1, Ordering::SeqCst);
        let sample = self.fetch_price().await?;
        let mut state = self.state.lock().await;
        Ok(Self::decide(&self.panel, &self.consensus, &mut state, &sample))
    }

    async fn fetch_price(&self) -> Result<PriceSample, TradeError> {
        let unavailable = |reason: String| TradeError::SourceUnavailable {
            symbol: self.symbol.clone(),
            reason,
        };

        // A zero timeout disables the bound.
        let fetched = if self.fetch_timeout.is_zero() {
            self.source.fetch(&self.symbol).await
        } else {
            match tokio::time::timeout(self.fetch_timeout, self.source.fetch(&self.symbol)).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(unavailable(format!(
                        "timed out after {:?}",
                        self.fetch_timeout
                    )))
                }
            }
        };
        let sample = fetched.map_err(|e| unavailable(e.to_string()))?;

        if sample.price <= Decimal::ZERO {
            return Err(unavailable(format!("non-positive price {}", sample.price)));
        }
        Ok(sample)
    }

    fn decide(
        panel: &[Box<dyn Evaluator>],
        consensus: &Consensus,
        state: &mut TraderState,
        sample: &PriceSample,
    ) -> CycleOutcome {
        let price = sample.price;
        state.history.record(price);

        let tally = {
            let view = MarketView {
                history: &state.history,
                price,
                previous_price: state.portfolio.last_price(),
                last_buy_price: state.portfolio.last_buy_price(),
                holding: state.portfolio.was_last_trade_buy(),
            };
            consensus.tally(panel, &view)
        };

        if state.portfolio.seed_last_buy_price(price) {
            debug!("Seeded reference buy price at {}", price);
        }

        let decision = consensus.decide(
            tally,
            state.portfolio.can_afford(price),
            state.portfolio.has_open_positions(),
        );
        debug!(buys = tally.buys, sells = tally.sells, ?decision, %price);

        let outcome = match decision {
            Decision::Buy => match state.portfolio.buy(price, sample.timestamp) {
                Ok(trade) => {
                    info!(
                        "Bought {} shares of {} at ${} (balance ${})",
                        trade.quantity,
                        sample.symbol,
                        price,
                        state.portfolio.balance()
                    );
                    CycleOutcome::Bought(trade)
                }
                Err(e) => {
                    warn!("Buy refused: {}", e);
                    CycleOutcome::Hold
                }
            },
            Decision::Sell => match state.portfolio.sell(price, sample.timestamp) {
                Ok(trade) => {
                    info!(
                        "Sold {} shares of {} at ${} (profit ${})",
                        trade.quantity,
                        sample.symbol,
                        price,
                        trade.profit.unwrap_or_default()
                    );
                    CycleOutcome::Sold(trade)
                }
                Err(e) => {
                    warn!("Sell refused: {}", e);
                    CycleOutcome::Hold
                }
            },
            Decision::Hold => CycleOutcome::Hold,
        };

        state.portfolio.observe_price(price);
        outcome
    }

    pub async fn snapshot(&self) -> StatusSnapshot {
        self.state.lock().await.portfolio.snapshot()
    }

    pub async fn performance(&self) -> PerformanceReport {
        self.state.lock().await.portfolio.report()
    }

    pub async fn is_trading(&self) -> bool {
        self.state.lock().await.portfolio.is_trading()
    }

    pub(crate) async fn set_trading(&self, enabled: bool) {
        self.state.lock().await.portfolio.set_trading(enabled);
    }
}
