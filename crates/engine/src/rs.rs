//! Relative-strength engine.
//!
//! Two-pass batch computation: pass one derives per-instrument metrics
//! (momentum returns, trend strength, volatility, Mansfield oscillators),
//! pass two ranks the whole universe into percentiles. The percentile is
//! universe-relative and must be recomputed whenever universe membership
//! changes, so it is never cached across runs.

use rs_screener_core::{
    Benchmark, BenchmarkKind, ComparisonLevels, Instrument, OscillatorReading, RsResult,
    ScreenerConfig,
};
use tracing::debug;

use crate::momentum::{momentum_returns, realized_volatility, trend_strength};
use crate::oscillator::mansfield_reading;
use crate::rank::percentiles;

/// Computes one `RsResult` per instrument in the universe.
#[derive(Debug, Clone)]
pub struct RsEngine {
    min_price_points: usize,
    oscillator_window: usize,
    volatility_window: usize,
    comparisons: ComparisonLevels,
}

impl RsEngine {
    #[must_use]
    pub fn new(config: &ScreenerConfig) -> Self {
        Self {
            min_price_points: ScreenerConfig::min_price_points(),
            oscillator_window: config.oscillator_window,
            volatility_window: config.volatility_window,
            comparisons: config.comparisons,
        }
    }

    /// Scores the whole universe. The output is index-aligned with the
    /// input slice.
    ///
    /// Instruments with fewer price points than the longest horizon get an
    /// all-null result and are excluded from the percentile denominator,
    /// but they keep their slot so the caller can report them as
    /// insufficient data.
    #[must_use]
    pub fn score_universe(
        &self,
        universe: &[Instrument],
        benchmarks: &[Benchmark],
    ) -> Vec<RsResult> {
        // Pass 1: independent per-instrument metrics.
        let mut results: Vec<RsResult> = universe
            .iter()
            .map(|instrument| self.score_instrument(instrument, benchmarks))
            .collect();

        // Pass 2: universe-wide percentile over the primary momentum
        // measure.
        let measures: Vec<Option<f64>> = results
            .iter()
            .map(|r| r.returns.weighted_measure())
            .collect();
        for (result, percentile) in results.iter_mut().zip(percentiles(&measures)) {
            result.percentile = percentile;
        }

        results
    }

    fn score_instrument(&self, instrument: &Instrument, benchmarks: &[Benchmark]) -> RsResult {
        if instrument.prices.len() < self.min_price_points {
            debug!(
                symbol = %instrument.symbol,
                points = instrument.prices.len(),
                required = self.min_price_points,
                "insufficient price history, reporting null metrics"
            );
            return RsResult::insufficient();
        }

        let returns = momentum_returns(&instrument.prices);

        RsResult {
            percentile: None, // assigned in pass 2
            trend_strength: trend_strength(&returns),
            volatility: realized_volatility(&instrument.prices, self.volatility_window),
            oscillators: self.instrument_oscillators(instrument, benchmarks),
            returns,
        }
    }

    /// Oscillator readings for the comparison levels enabled in
    /// configuration: every index benchmark, plus the instrument's own
    /// sector benchmark.
    fn instrument_oscillators(
        &self,
        instrument: &Instrument,
        benchmarks: &[Benchmark],
    ) -> Vec<OscillatorReading> {
        benchmarks
            .iter()
            .filter(|benchmark| match &benchmark.kind {
                BenchmarkKind::Index => self.comparisons.stock_vs_index,
                BenchmarkKind::Sector(tag) => {
                    self.comparisons.stock_vs_sector && *tag == instrument.sector
                }
            })
            .filter_map(|benchmark| {
                mansfield_reading(
                    &benchmark.name,
                    &instrument.prices,
                    &benchmark.prices,
                    self.oscillator_window,
                )
            })
            .collect()
    }

    /// Sector-vs-index oscillators: each sector benchmark measured against
    /// the first index benchmark. Empty when that comparison level is
    /// disabled or no index benchmark exists.
    #[must_use]
    pub fn sector_oscillators(&self, benchmarks: &[Benchmark]) -> Vec<OscillatorReading> {
        if !self.comparisons.sector_vs_index {
            return vec![];
        }
        let Some(index) = benchmarks
            .iter()
            .find(|b| b.kind == BenchmarkKind::Index)
        else {
            return vec![];
        };

        benchmarks
            .iter()
            .filter(|b| b.sector().is_some())
            .filter_map(|sector| {
                mansfield_reading(
                    &format!("{} vs {}", sector.name, index.name),
                    &sector.prices,
                    &index.prices,
                    self.oscillator_window,
                )
            })
            .collect()
    }
}
