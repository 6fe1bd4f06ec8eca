// src/main.rs
use anyhow::Context;
use dotenvy::dotenv;
use paper_trader::api::{self, AppState};
use paper_trader::config::AppConfig;
use paper_trader::connectors::{PriceSource, SimulatedFeed};
use paper_trader::core::{Scheduler, TradingEngine};
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "paper_trader.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = init_logging();

    // 1. Load Configuration
    let config = AppConfig::new().context("failed to load configuration")?;

    println!("========================================");
    println!("       PAPER TRADER - v{}", env!("CARGO_PKG_VERSION"));
    println!("========================================");
    println!("Target:  {}", config.symbol);
    println!("Balance: ${}", config.initial_balance);
    println!("Mode:    📝 PAPER TRADING");
    println!("========================================");

    // 2. Price feed
    let feed = Arc::new(SimulatedFeed::new(config.feed.clone()));
    let feed_task = feed.spawn(config.symbol.clone());

    // 3. Engine + scheduler
    let source: Arc<dyn PriceSource> = feed;
    let engine = Arc::new(TradingEngine::new(&config, source));
    let scheduler = Arc::new(Scheduler::new(engine, config.tick_period()));

    if config.auto_start {
        scheduler.start().await;
    }

    // 4. Control surface, until Ctrl+C
    let state = AppState {
        scheduler: Arc::clone(&scheduler),
    };
    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!("Failed to listen for Ctrl+C, shutting down: {}", e),
        }
    };
    api::run_server(config.server.bind_addr, state, shutdown).await?;

    scheduler.stop().await;
    feed_task.abort();
    info!("Final report: {:?}", scheduler.engine().performance().await);

    Ok(())
}
