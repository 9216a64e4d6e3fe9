use thiserror::Error;

/// Error taxonomy for the screening core.
///
/// Per-instrument data gaps are not errors: inside the engines a missing
/// metric is `None` and the instrument is excluded only from computations
/// that strictly require it. Only malformed inputs and bad configuration
/// abort a run.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Unknown strategy, out-of-range threshold, or empty universe.
    /// Fatal for the run; raised before any scoring begins.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A price series violated its ordering contract (non-monotonic or
    /// duplicate timestamps).
    #[error("invalid price series: {0}")]
    InvalidPriceSeries(String),

    /// An instrument lacks enough history for a requested metric. Used at
    /// the provider/loader seams; never raised by the scoring engines.
    #[error("insufficient data for {symbol}: {what}")]
    InsufficientData { symbol: String, what: String },
}
