//! Scoring and ranking engines for the RS + Quality screener.
//!
//! The pipeline is `RsEngine` → `QualityEngine` → `CompositeRanker`,
//! orchestrated by [`Screener`]. Data arrives through the provider traits
//! in `rs-screener-core` and leaves as a `ScreenOutcome`; everything in
//! between is pure, synchronous computation over the in-memory batch.

pub mod loader;
pub mod momentum;
pub mod oscillator;
pub mod quality;
pub mod rank;
pub mod ranker;
pub mod risk;
pub mod rs;
pub mod screener;

pub use loader::{load_benchmarks, load_universe, UniverseEntry};
pub use quality::{QualityEngine, QualityWeights};
pub use ranker::{classify_signal, CompositeRanker, ScoredInstrument};
pub use risk::risk_score;
pub use rs::RsEngine;
pub use screener::Screener;
