//! Composite ranking: blends RS and quality under the active strategy,
//! applies the caller's filters, classifies signals, and produces the
//! ordered result set plus run-level summary.
//!
//! Filtering happens strictly after the universe-wide percentile pass, so
//! thresholds never alter the percentile computation.

use std::collections::BTreeMap;

use rs_screener_core::{
    CompositeResult, FundamentalsSnapshot, OscillatorReading, QualityResult, RsResult,
    ScreenOutcome, ScreenSummary, ScreenerConfig, Signal, Strategy,
};
use tracing::debug;

use crate::risk::risk_score;

/// One instrument with both engine results attached, ready for ranking.
#[derive(Debug, Clone)]
pub struct ScoredInstrument {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub fundamentals: Option<FundamentalsSnapshot>,
    pub rs: RsResult,
    pub quality: QualityResult,
}

/// Classifies a signal from RS percentile and quality score, first match
/// wins: BUY at 85/60, WATCH at 70/40, otherwise AVOID. A null quality
/// score can never reach BUY or WATCH.
#[must_use]
pub fn classify_signal(rs_percentile: u8, quality_score: Option<f64>) -> Signal {
    match quality_score {
        Some(q) if rs_percentile >= 85 && q >= 60.0 => Signal::Buy,
        Some(q) if rs_percentile >= 70 && q >= 40.0 => Signal::Watch,
        _ => Signal::Avoid,
    }
}

/// Ranks scored instruments into the final ordered result set.
#[derive(Debug, Clone)]
pub struct CompositeRanker {
    config: ScreenerConfig,
}

impl CompositeRanker {
    #[must_use]
    pub fn new(config: &ScreenerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Produces the ordered results and summary for one run.
    ///
    /// An empty result set is a zero-count outcome, not an error: the
    /// caller can relax thresholds and re-run.
    #[must_use]
    pub fn rank(
        &self,
        scored: Vec<ScoredInstrument>,
        sector_oscillators: Vec<OscillatorReading>,
    ) -> ScreenOutcome {
        let universe_size = scored.len();

        let mut insufficient_data: Vec<String> = scored
            .iter()
            .filter(|s| s.rs.percentile.is_none())
            .map(|s| s.symbol.clone())
            .collect();
        insufficient_data.sort();

        let scored_count = universe_size - insufficient_data.len();

        let volatilities: Vec<Option<f64>> = scored.iter().map(|s| s.rs.volatility).collect();
        let calmness = calmness_scores(&volatilities);

        let mut results: Vec<CompositeResult> = scored
            .into_iter()
            .zip(calmness)
            .filter_map(|(instrument, calmness)| self.compose(instrument, calmness))
            .collect();

        let matched = results.len();
        debug!(
            universe = universe_size,
            scored = scored_count,
            matched,
            "composite ranking complete"
        );

        // Deterministic total order: composite desc, RS percentile desc,
        // quality desc, then symbol as the final stable tie-break.
        results.sort_by(|a, b| {
            b.composite_score
                .partial_cmp(&a.composite_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.rs.percentile.cmp(&a.rs.percentile))
                .then_with(|| {
                    b.quality
                        .overall
                        .partial_cmp(&a.quality.overall)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.symbol.cmp(&b.symbol))
        });

        if let Some(cap) = self.config.max_results {
            results.truncate(cap);
        }

        let summary = build_summary(
            universe_size,
            scored_count,
            matched,
            &results,
            insufficient_data,
            sector_oscillators,
        );

        ScreenOutcome { results, summary }
    }

    /// Blends one instrument, or drops it: missing percentile always
    /// excludes, missing quality excludes when the strategy requires it,
    /// and the caller's thresholds and fundamental bounds apply last.
    ///
    /// Under the low-volatility strategy the non-RS side of the blend is
    /// an even split between the quality score and `calmness`; every
    /// other strategy uses the quality score alone.
    fn compose(&self, instrument: ScoredInstrument, calmness: f64) -> Option<CompositeResult> {
        let strategy = self.config.strategy;
        let percentile = instrument.rs.percentile?;
        let quality_score = instrument.quality.overall;

        if strategy.requires_quality() && quality_score.is_none() {
            return None;
        }
        if percentile < self.config.min_rs_percentile {
            return None;
        }
        if strategy.requires_quality() && quality_score? < self.config.min_quality_score {
            return None;
        }
        if !self.passes_bounds(instrument.fundamentals.as_ref()) {
            return None;
        }

        let quality_component = if strategy == Strategy::RsLowVolatility {
            0.5 * quality_score.unwrap_or(0.0) + 0.5 * calmness
        } else {
            quality_score.unwrap_or(0.0)
        };
        let composite_score = strategy.rs_weight() * f64::from(percentile)
            + strategy.quality_weight() * quality_component;

        Some(CompositeResult {
            signal: classify_signal(percentile, quality_score),
            risk_score: risk_score(instrument.rs.volatility, instrument.fundamentals.as_ref()),
            symbol: instrument.symbol,
            name: instrument.name,
            sector: instrument.sector,
            composite_score,
            rs: instrument.rs,
            quality: instrument.quality,
        })
    }

    /// Fundamental-ratio bounds. A missing ratio never disqualifies:
    /// absence of data is not evidence of weakness.
    fn passes_bounds(&self, fundamentals: Option<&FundamentalsSnapshot>) -> bool {
        let bounds = &self.config.bounds;
        let Some(f) = fundamentals else {
            return true;
        };

        if let (Some(min), Some(roe)) = (bounds.min_roe, f.roe) {
            if roe < min {
                return false;
            }
        }
        if let (Some(max), Some(de)) = (bounds.max_debt_to_equity, f.debt_to_equity) {
            if de > max {
                return false;
            }
        }
        if let (Some(min), Some(margin)) = (bounds.min_operating_margin, f.operating_margin) {
            if margin < min {
                return false;
            }
        }
        true
    }
}

/// Universe-relative calmness in [0, 100]: the volatility span inverted
/// by min-max normalization, so the calmest instrument scores 100 and
/// the wildest 0. Instruments without a volatility reading, or a
/// universe with no volatility spread, sit at the neutral midpoint.
fn calmness_scores(volatilities: &[Option<f64>]) -> Vec<f64> {
    let defined: Vec<f64> = volatilities.iter().flatten().copied().collect();
    let (Some(min), Some(max)) = (
        defined.iter().copied().reduce(f64::min),
        defined.iter().copied().reduce(f64::max),
    ) else {
        return vec![50.0; volatilities.len()];
    };
    if max - min < f64::EPSILON {
        return vec![50.0; volatilities.len()];
    }

    volatilities
        .iter()
        .map(|v| match v {
            Some(vol) => (1.0 - (vol - min) / (max - min)) * 100.0,
            None => 50.0,
        })
        .collect()
}

fn build_summary(
    universe_size: usize,
    scored: usize,
    matched: usize,
    results: &[CompositeResult],
    insufficient_data: Vec<String>,
    sector_oscillators: Vec<OscillatorReading>,
) -> ScreenSummary {
    let mut sector_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut buy_count = 0;
    let mut watch_count = 0;
    let mut avoid_count = 0;

    for result in results {
        *sector_counts.entry(result.sector.clone()).or_insert(0) += 1;
        match result.signal {
            Signal::Buy => buy_count += 1,
            Signal::Watch => watch_count += 1,
            Signal::Avoid => avoid_count += 1,
        }
    }

    let avg_rs_percentile = if results.is_empty() {
        None
    } else {
        let sum: f64 = results
            .iter()
            .filter_map(|r| r.rs.percentile)
            .map(f64::from)
            .sum();
        Some(sum / results.len() as f64)
    };

    let quality_scores: Vec<f64> = results.iter().filter_map(|r| r.quality.overall).collect();
    let avg_quality_score = if quality_scores.is_empty() {
        None
    } else {
        Some(quality_scores.iter().sum::<f64>() / quality_scores.len() as f64)
    };

    ScreenSummary {
        universe_size,
        scored,
        matched,
        buy_count,
        watch_count,
        avoid_count,
        avg_rs_percentile,
        avg_quality_score,
        sector_counts,
        insufficient_data,
        sector_oscillators,
    }
}
