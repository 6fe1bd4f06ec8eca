//! Paper-trading decision engine for a single instrument.
//!
//! A [`core::Scheduler`] pulls one price per tick from a [`connectors::PriceSource`],
//! folds it into the rolling [`core::history::PriceHistory`], polls the evaluator
//! panel in [`strategies`], lets [`core::consensus::Consensus`] vote, and applies
//! the result to the [`core::ledger::Portfolio`].

pub mod api;
pub mod config;
pub mod connectors;
pub mod core;
pub mod error;
pub mod strategies;
pub mod types;
pub mod utils;

pub use error::TradeError;
