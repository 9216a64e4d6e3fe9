//! Assembles the in-memory screening batch from the provider seams.
//!
//! A failing symbol is logged and skipped, and missing fundamentals
//! degrade to `None`; a per-instrument gap never aborts the batch. Retry
//! policy, if any, belongs inside the providers.

use rs_screener_core::{
    Benchmark, BenchmarkKind, FundamentalsProvider, Instrument, PriceSeriesProvider,
};
use tracing::{debug, warn};

/// Identity of one universe member, as supplied by the universe source.
#[derive(Debug, Clone)]
pub struct UniverseEntry {
    pub symbol: String,
    pub name: String,
    pub sector: String,
}

impl UniverseEntry {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: sector.into(),
        }
    }
}

/// Fetches prices and fundamentals for every universe entry.
///
/// Entries whose price series cannot be fetched are dropped with a
/// warning; entries whose fundamentals cannot be fetched keep a `None`
/// snapshot and stay in the universe.
pub async fn load_universe(
    prices: &dyn PriceSeriesProvider,
    fundamentals: &dyn FundamentalsProvider,
    entries: &[UniverseEntry],
) -> Vec<Instrument> {
    let mut universe = Vec::with_capacity(entries.len());

    for entry in entries {
        let series = match prices.instrument_series(&entry.symbol).await {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol = %entry.symbol, error = %e, "skipping symbol, price fetch failed");
                continue;
            }
        };

        let snapshot = match fundamentals.latest_fundamentals(&entry.symbol).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(symbol = %entry.symbol, error = %e, "fundamentals fetch failed, scoring RS only");
                None
            }
        };

        universe.push(Instrument::new(
            entry.symbol.clone(),
            entry.name.clone(),
            entry.sector.clone(),
            series,
            snapshot,
        ));
    }

    debug!(
        requested = entries.len(),
        loaded = universe.len(),
        "universe load complete"
    );
    universe
}

/// Fetches benchmark series. Failures are logged and skipped; the engines
/// tolerate an absent benchmark.
pub async fn load_benchmarks(
    prices: &dyn PriceSeriesProvider,
    specs: &[(String, BenchmarkKind)],
) -> Vec<Benchmark> {
    let mut benchmarks = Vec::with_capacity(specs.len());

    for (name, kind) in specs {
        match prices.benchmark_series(name).await {
            Ok(series) => benchmarks.push(Benchmark::new(name.clone(), kind.clone(), series)),
            Err(e) => warn!(benchmark = %name, error = %e, "skipping benchmark, fetch failed"),
        }
    }

    benchmarks
}
