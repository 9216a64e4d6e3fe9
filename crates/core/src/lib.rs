//! Shared domain types for the RS + Quality screener: instruments and
//! their price history, scoring result types, configuration, the error
//! taxonomy, and the provider traits data enters through.

pub mod config;
pub mod error;
pub mod instrument;
pub mod score;
pub mod traits;

pub use config::{
    ComparisonLevels, ConfigLoader, FundamentalBounds, ScreenerConfig, Strategy,
};
pub use error::ScreenerError;
pub use instrument::{
    Benchmark, BenchmarkKind, FundamentalsSnapshot, Instrument, PricePoint, PriceSeries,
};
pub use score::{
    CompositeResult, Horizon, MomentumReturns, OscillatorReading, QualityResult, RsResult,
    ScreenOutcome, ScreenSummary, Signal, ZeroCross,
};
pub use traits::{FundamentalsProvider, PriceSeriesProvider};
