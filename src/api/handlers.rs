// src/api/handlers.rs
use crate::api::AppState;
use crate::types::{PerformanceReport, StatusSnapshot};
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// # GET /status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusSnapshot> {
    Json(state.scheduler.engine().snapshot().await)
}

/// # GET /performance
/// Full trade history plus cumulative realized P&L.
pub async fn get_performance(State(state): State<Arc<AppState>>) -> Json<PerformanceReport> {
    Json(state.scheduler.engine().performance().await)
}

/// # POST /start
/// Restarts the schedule if it is already running.
pub async fn start_trading(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.scheduler.start().await;
    Json(MessageResponse {
        message: "Trading bot started",
    })
}

/// # POST /stop
pub async fn stop_trading(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.scheduler.stop().await;
    Json(MessageResponse {
        message: "Trading bot stopped",
    })
}
