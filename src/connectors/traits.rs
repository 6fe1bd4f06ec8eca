use crate::types::PriceSample;
use anyhow::Result;
use async_trait::async_trait;

/// Anything that can quote the latest price for a symbol.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, symbol: &str) -> Result<PriceSample>;
}
