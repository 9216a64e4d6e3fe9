use anyhow::Result;
use async_trait::async_trait;

use crate::instrument::{FundamentalsSnapshot, PriceSeries};

/// Supplies historical adjusted-close series. Fetching may be concurrent
/// or async internally; the scoring core only ever sees the finished
/// in-memory batch.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    async fn instrument_series(&self, symbol: &str) -> Result<PriceSeries>;
    async fn benchmark_series(&self, name: &str) -> Result<PriceSeries>;
}

/// Supplies the latest fundamentals snapshot per instrument. `Ok(None)`
/// means the provider has no fundamentals for the symbol, which is a
/// first-class state rather than an error.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    async fn latest_fundamentals(&self, symbol: &str) -> Result<Option<FundamentalsSnapshot>>;
}
