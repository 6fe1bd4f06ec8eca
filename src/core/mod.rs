pub mod consensus;
pub mod engine;
pub mod history;
pub mod ledger;
pub mod scheduler;

pub use engine::TradingEngine;
pub use scheduler::{Scheduler, SchedulerState};
