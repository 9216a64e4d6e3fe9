//! Screening run orchestration.
//!
//! Single-threaded, synchronous computation over the pre-fetched batch:
//! RS engine, then quality engine, then composite ranking. Identical
//! inputs always produce an identical outcome; nothing here depends on
//! the wall clock or randomness.

use rs_screener_core::{
    Benchmark, Instrument, ScreenOutcome, ScreenerConfig, ScreenerError,
};
use tracing::info;

use crate::quality::QualityEngine;
use crate::ranker::{CompositeRanker, ScoredInstrument};
use crate::rs::RsEngine;

/// The full scoring pipeline behind one configuration.
pub struct Screener {
    config: ScreenerConfig,
    rs_engine: RsEngine,
    quality_engine: QualityEngine,
    ranker: CompositeRanker,
}

impl Screener {
    /// Creates a screener, validating the configuration up front.
    ///
    /// # Errors
    /// Returns `ScreenerError::InvalidConfiguration` for out-of-range
    /// thresholds or an unknown strategy, before any scoring begins.
    pub fn new(config: ScreenerConfig) -> Result<Self, ScreenerError> {
        config.validate()?;
        Ok(Self {
            rs_engine: RsEngine::new(&config),
            quality_engine: QualityEngine::new(config.strategy),
            ranker: CompositeRanker::new(&config),
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Runs one screening pass over the universe.
    ///
    /// # Errors
    /// Returns `ScreenerError::InvalidConfiguration` if the universe is
    /// empty. Per-instrument data gaps never fail the run; they surface
    /// as null metrics and the `insufficient_data` summary list.
    pub fn run(
        &self,
        universe: &[Instrument],
        benchmarks: &[Benchmark],
    ) -> Result<ScreenOutcome, ScreenerError> {
        if universe.is_empty() {
            return Err(ScreenerError::InvalidConfiguration(
                "universe is empty".to_string(),
            ));
        }

        info!(
            universe = universe.len(),
            benchmarks = benchmarks.len(),
            strategy = ?self.config.strategy,
            "starting screening run"
        );

        let rs_results = self.rs_engine.score_universe(universe, benchmarks);

        let scored: Vec<ScoredInstrument> = universe
            .iter()
            .zip(rs_results)
            .map(|(instrument, rs)| ScoredInstrument {
                symbol: instrument.symbol.clone(),
                name: instrument.name.clone(),
                sector: instrument.sector.clone(),
                quality: self.quality_engine.score(instrument.fundamentals.as_ref()),
                fundamentals: instrument.fundamentals.clone(),
                rs,
            })
            .collect();

        let sector_oscillators = self.rs_engine.sector_oscillators(benchmarks);
        let outcome = self.ranker.rank(scored, sector_oscillators);

        info!(
            matched = outcome.summary.matched,
            buy = outcome.summary.buy_count,
            watch = outcome.summary.watch_count,
            avoid = outcome.summary.avoid_count,
            "screening run complete"
        );
        Ok(outcome)
    }
}
