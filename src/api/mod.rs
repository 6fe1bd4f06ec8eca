// src/api/mod.rs
use crate::core::Scheduler;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod handlers;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<Scheduler>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/status", get(handlers::get_status))
        .route("/performance", get(handlers::get_performance))
        .route("/start", post(handlers::start_trading))
        .route("/stop", post(handlers::stop_trading))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Serves the control surface until `shutdown` resolves.
pub async fn run_server<F>(addr: SocketAddr, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Control server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
