// src/core/history.rs
use crate::error::TradeError;
use crate::utils::precision::mean;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Which rolling window to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Raw,
    Short,
    Long,
}

/// Fixed-capacity FIFO of prices.
#[derive(Debug, Clone)]
pub struct Window {
    capacity: usize,
    samples: VecDeque<Decimal>,
}

impl Window {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn push(&mut self, price: Decimal) {
        self.samples.push_back(price);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn latest(&self) -> Option<Decimal> {
        self.samples.back().copied()
    }

    /// Mean of the whole window; only defined once the window is full.
    pub fn mean(&self) -> Result<Decimal, TradeError> {
        if !self.is_full() {
            return Err(self.short_of(self.capacity));
        }
        mean(&self.samples).ok_or(self.short_of(self.capacity))
    }

    /// Mean of the newest `n` samples.
    pub fn tail_mean(&self, n: usize) -> Result<Decimal, TradeError> {
        if n == 0 || self.samples.len() < n {
            return Err(self.short_of(n.max(1)));
        }
        mean(self.samples.iter().skip(self.samples.len() - n)).ok_or(self.short_of(n))
    }

    fn short_of(&self, need: usize) -> TradeError {
        TradeError::InsufficientData {
            have: self.samples.len(),
            need,
        }
    }

    pub fn to_vec(&self) -> Vec<Decimal> {
        self.samples.iter().copied().collect()
    }
}

/// The raw price window plus the two moving-average windows, fed together.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    raw: Window,
    short: Window,
    long: Window,
}

impl PriceHistory {
    pub fn new(raw: usize, short: usize, long: usize) -> Self {
        Self {
            raw: Window::new(raw),
            short: Window::new(short),
            long: Window::new(long),
        }
    }

    pub fn record(&mut self, price: Decimal) {
        self.raw.push(price);
        self.short.push(price);
        self.long.push(price);
    }

    pub fn window(&self, kind: WindowKind) -> &Window {
        match kind {
            WindowKind::Raw => &self.raw,
            WindowKind::Short => &self.short,
            WindowKind::Long => &self.long,
        }
    }

    /// Arithmetic mean of a full window, `InsufficientData` otherwise.
    pub fn average(&self, kind: WindowKind) -> Result<Decimal, TradeError> {
        self.window(kind).mean()
    }

    pub fn tail_mean(&self, n: usize) -> Result<Decimal, TradeError> {
        self.raw.tail_mean(n)
    }

    /// Volume-weighted average over the raw window with unit volume per sample,
    /// i.e. the plain mean of whatever has been recorded so far.
    pub fn vwap(&self) -> Result<Decimal, TradeError> {
        let volumes = std::iter::repeat(Decimal::ONE).take(self.raw.len());
        let (notional, volume) = self
            .raw
            .samples
            .iter()
            .zip(volumes)
            .fold((Decimal::ZERO, Decimal::ZERO), |(n, v), (p, q)| (n + *p * q, v + q));
        if volume.is_zero() {
            return Err(TradeError::InsufficientData { have: 0, need: 1 });
        }
        Ok(notional / volume)
    }

    pub fn latest(&self) -> Option<Decimal> {
        self.raw.latest()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
