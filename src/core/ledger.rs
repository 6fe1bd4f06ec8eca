// src/core/ledger.rs
use crate::error::TradeError;
use crate::types::{PerformanceReport, Position, Side, StatusSnapshot, Trade};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use uuid::Uuid;

/// Every trade moves exactly one unit.
pub const UNIT: Decimal = Decimal::ONE;

/// Cash, open positions and trade history. The only place financial state changes.
#[derive(Debug, Clone)]
pub struct Portfolio {
    initial_balance: Decimal,
    balance: Decimal,
    positions: VecDeque<Position>,
    trades: Vec<Trade>,
    last_price: Option<Decimal>,
    last_buy_price: Option<Decimal>,
    trading_enabled: bool,
}

impl Portfolio {
    pub fn new(initial_balance: Decimal) -> Self {
        Self {
            initial_balance,
            balance: initial_balance,
            positions: VecDeque::new(),
            trades: Vec::new(),
            last_price: None,
            last_buy_price: None,
            trading_enabled: false,
        }
    }

    pub fn can_afford(&self, price: Decimal) -> bool {
        self.balance >= price * UNIT
    }

    pub fn buy(&mut self, price: Decimal, time: DateTime<Utc>) -> Result<Trade, TradeError> {
        let cost = price * UNIT;
        if !self.can_afford(price) {
            return Err(TradeError::InsufficientFunds {
                required: cost,
                available: self.balance,
            });
        }

        self.balance -= cost;
        self.positions.push_back(Position {
            quantity: UNIT,
            entry_price: price,
            opened_at: time,
        });
        let trade = Trade {
            id: Uuid::new_v4(),
            side: Side::Buy,
            price,
            quantity: UNIT,
            profit: None,
            timestamp: time,
        };
        self.trades.push(trade.clone());
        self.last_buy_price = Some(price);
        Ok(trade)
    }

    /// Closes the oldest open position.
    pub fn sell(&mut self, price: Decimal, time: DateTime<Utc>) -> Result<Trade, TradeError> {
        let position = self
            .positions
            .pop_front()
            .ok_or(TradeError::EmptyPositions)?;

        let proceeds = price * position.quantity;
        let cost_basis = position.entry_price * position.quantity;
        self.balance += proceeds;

        let trade = Trade {
            id: Uuid::new_v4(),
            side: Side::Sell,
            price,
            quantity: position.quantity,
            profit: Some(proceeds - cost_basis),
            timestamp: time,
        };
        self.trades.push(trade.clone());
        Ok(trade)
    }

    pub fn observe_price(&mut self, price: Decimal) {
        self.last_price = Some(price);
    }

    /// Sets the reference buy price if no buy has happened yet. Returns true when seeded.
    pub fn seed_last_buy_price(&mut self, price: Decimal) -> bool {
        if self.last_buy_price.is_some() {
            return false;
        }
        self.last_buy_price = Some(price);
        true
    }

    pub fn last_price(&self) -> Option<Decimal> {
        self.last_price
    }

    pub fn last_buy_price(&self) -> Option<Decimal> {
        self.last_buy_price
    }

    pub fn was_last_trade_buy(&self) -> bool {
        matches!(self.trades.last(), Some(t) if t.side == Side::Buy)
    }

    pub fn has_open_positions(&self) -> bool {
        !self.positions.is_empty()
    }

    pub fn open_position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn realized_pnl(&self) -> Decimal {
        self.trades
            .iter()
            .filter(|t| t.side == Side::Sell)
            .filter_map(|t| t.profit)
            .sum()
    }

    pub fn is_trading(&self) -> bool {
        self.trading_enabled
    }

    pub fn set_trading(&mut self, enabled: bool) {
        self.trading_enabled = enabled;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            balance: self.balance,
            positions: self.positions.iter().cloned().collect(),
            last_price: self.last_price,
            total_trades: self.trades.len(),
            is_trading: self.trading_enabled,
            total_profit_loss: self.realized_pnl(),
        }
    }

    pub fn report(&self) -> PerformanceReport {
        PerformanceReport {
            initial_balance: self.initial_balance,
            current_balance: self.balance,
            total_trades: self.trades.len(),
            total_profit_loss: self.realized_pnl(),
            trades: self.trades.clone(),
        }
    }
}
