// src/types.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

/// One price observation pulled from a price source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSample {
    pub symbol: String,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// What a single evaluator thinks about the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opinion {
    Buy,
    Sell,
    Abstain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub quantity: Decimal,
    pub entry_price: Decimal,
    pub opened_at: DateTime<Utc>,
}

/// A completed buy or sell. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Realized profit, sells only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

/// Result of one decision cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Bought(Trade),
    Sold(Trade),
    Hold,
}

// --- Read-only views for the control surface ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub balance: Decimal,
    pub positions: Vec<Position>,
    pub last_price: Option<Decimal>,
    pub total_trades: usize,
    pub is_trading: bool,
    pub total_profit_loss: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub initial_balance: Decimal,
    pub current_balance: Decimal,
    pub total_trades: usize,
    pub total_profit_loss: Decimal,
    pub trades: Vec<Trade>,
}
