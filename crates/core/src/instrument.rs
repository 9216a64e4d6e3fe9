//! Instruments, benchmarks, and their price history.
//!
//! A screening run operates on an immutable in-memory batch: every
//! instrument and benchmark carries its full adjusted-close history,
//! fetched by the provider collaborators before scoring begins.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;

/// A single adjusted-close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: Decimal,
}

impl PricePoint {
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self { timestamp, close }
    }
}

/// An ordered adjusted-close series.
///
/// Construction enforces strictly increasing timestamps; a series that is
/// out of order or contains duplicates is rejected rather than silently
/// re-sorted, since that indicates a provider bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries(Vec<PricePoint>);

impl PriceSeries {
    /// Creates a validated price series.
    ///
    /// # Errors
    /// Returns `ScreenerError::InvalidPriceSeries` if timestamps are not
    /// strictly increasing.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, ScreenerError> {
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ScreenerError::InvalidPriceSeries(format!(
                    "timestamps must be strictly increasing, got {} after {}",
                    pair[1].timestamp, pair[0].timestamp
                )));
            }
        }
        Ok(Self(points))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    /// Returns the most recent close, if any.
    #[must_use]
    pub fn last_close(&self) -> Option<Decimal> {
        self.0.last().map(|p| p.close)
    }

    /// Returns the close `n` observations before the most recent one.
    /// `close_n_back(0)` is the last close.
    #[must_use]
    pub fn close_n_back(&self, n: usize) -> Option<Decimal> {
        let idx = self.0.len().checked_sub(n + 1)?;
        Some(self.0[idx].close)
    }
}

/// Latest fundamental ratios for one instrument.
///
/// Every ratio is optional: absence is a first-class state, never zero.
/// Growth and margin figures are percentages (15.0 = 15%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub operating_margin: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub fcf_yield: Option<f64>,
}

impl FundamentalsSnapshot {
    /// Returns true if at least one ratio is present.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.roe.is_some()
            || self.roa.is_some()
            || self.operating_margin.is_some()
            || self.debt_to_equity.is_some()
            || self.current_ratio.is_some()
            || self.revenue_growth.is_some()
            || self.earnings_growth.is_some()
            || self.fcf_yield.is_some()
    }
}

/// One member of the screening universe. Immutable after creation and
/// discarded at the end of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub prices: PriceSeries,
    pub fundamentals: Option<FundamentalsSnapshot>,
}

impl Instrument {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        prices: PriceSeries,
        fundamentals: Option<FundamentalsSnapshot>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: sector.into(),
            prices,
            fundamentals,
        }
    }
}

/// What a benchmark series represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkKind {
    /// A broad market index (e.g. the universe index itself).
    Index,
    /// A sector index, tagged with the sector it covers.
    Sector(String),
}

/// A comparison series for relative-strength oscillators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benchmark {
    pub name: String,
    pub kind: BenchmarkKind,
    pub prices: PriceSeries,
}

impl Benchmark {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: BenchmarkKind, prices: PriceSeries) -> Self {
        Self {
            name: name.into(),
            kind,
            prices,
        }
    }

    /// Returns the sector tag if this is a sector benchmark.
    #[must_use]
    pub fn sector(&self) -> Option<&str> {
        match &self.kind {
            BenchmarkKind::Sector(tag) => Some(tag),
            BenchmarkKind::Index => None,
        }
    }
}
