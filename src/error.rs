// src/error.rs
use rust_decimal::Decimal;
use thiserror::Error;

/// Conditions raised inside a decision cycle. None of them is fatal to the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    /// A window has not filled up yet. Evaluators treat this as "abstain".
    #[error("insufficient data: have {have} samples, need {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("no open positions to close")]
    EmptyPositions,

    #[error("price source unavailable for {symbol}: {reason}")]
    SourceUnavailable { symbol: String, reason: String },
}
