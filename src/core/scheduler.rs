// src/core/scheduler.rs
use crate::core::engine::TradingEngine;
use crate::types::CycleOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Periodic driver for the engine.
///
/// At most one decision cycle runs at a time: the loop awaits each cycle
/// before taking the next tick, and ticks that fall due while a cycle is
/// still in flight are skipped rather than queued.
pub struct Scheduler {
    engine: Arc<TradingEngine>,
    period: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(engine: Arc<TradingEngine>, period: Duration) -> Self {
        Self {
            engine,
            period,
            handle: Mutex::new(None),
        }
    }

    pub fn engine(&self) -> &Arc<TradingEngine> {
        &self.engine
    }

    pub async fn state(&self) -> SchedulerState {
        match self.handle.lock().await.as_ref() {
            Some(h) if !h.is_finished() => SchedulerState::Running,
            _ => SchedulerState::Stopped,
        }
    }

    /// Starts the periodic trigger, replacing any trigger already running.
    pub async fn start(&self) {
        let mut handle = self.handle.lock().await;
        if let Some(previous) = handle.take() {
            previous.abort();
            // Wait it out so two loops never overlap.
            let _ = previous.await;
            debug!("Previous trading loop cancelled before restart");
        }

        self.engine.set_trading(true).await;
        *handle = Some(tokio::spawn(run_loop(Arc::clone(&self.engine), self.period)));
        info!("Trading bot started ({:?} period)", self.period);
    }

    /// Stops the periodic trigger. Safe to call when already stopped.
    pub async fn stop(&self) {
        let mut handle = self.handle.lock().await;
        if let Some(running) = handle.take() {
            running.abort();
            let _ = running.await;
            info!("Trading bot stopped");
        }
        self.engine.set_trading(false).await;
    }
}

async fn run_loop(engine: Arc<TradingEngine>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let due = ticker.tick().await;
        let lag = Instant::now().saturating_duration_since(due);
        if lag >= period {
            let skipped = lag.as_millis() / period.as_millis().max(1);
            warn!("Decision cycle overran; skipped {} tick(s)", skipped);
        }

        match engine.run_cycle().await {
            Ok(CycleOutcome::Hold) => {}
            Ok(outcome) => debug!(?outcome, "cycle complete"),
            Err(e) => error!("Error in trading logic: {}", e),
        }
    }
}
