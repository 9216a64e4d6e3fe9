//! Scoring result types shared between the engines and the report layer.
//!
//! `ScreenOutcome` is the only contract downstream consumers (UI tables,
//! CSV export, AI narrative) depend on; they never reach back into the
//! engines.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Momentum measurement horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Horizon {
    /// All horizons, shortest first.
    pub const ALL: [Self; 4] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::TwelveMonths,
    ];

    /// Trading days covered by this horizon (21 days per month).
    #[must_use]
    pub const fn trading_days(self) -> usize {
        match self {
            Self::OneMonth => 21,
            Self::ThreeMonths => 63,
            Self::SixMonths => 126,
            Self::TwelveMonths => 252,
        }
    }

    /// Weight of this horizon in the primary momentum measure.
    ///
    /// Longer horizons are weighted more heavily: 1M 0.10, 3M 0.20,
    /// 6M 0.30, 12M 0.40. Weights are re-normalized over whichever
    /// horizons are available.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::OneMonth => 0.10,
            Self::ThreeMonths => 0.20,
            Self::SixMonths => 0.30,
            Self::TwelveMonths => 0.40,
        }
    }
}

/// Simple returns at each momentum horizon. A horizon whose historical
/// price point is missing is `None`, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumReturns {
    pub one_month: Option<f64>,
    pub three_months: Option<f64>,
    pub six_months: Option<f64>,
    pub twelve_months: Option<f64>,
}

impl MomentumReturns {
    #[must_use]
    pub const fn get(&self, horizon: Horizon) -> Option<f64> {
        match horizon {
            Horizon::OneMonth => self.one_month,
            Horizon::ThreeMonths => self.three_months,
            Horizon::SixMonths => self.six_months,
            Horizon::TwelveMonths => self.twelve_months,
        }
    }

    /// The primary momentum measure: weighted combination of the available
    /// horizon returns, with weights re-normalized over the horizons that
    /// are present. `None` when every horizon is missing.
    #[must_use]
    pub fn weighted_measure(&self) -> Option<f64> {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for horizon in Horizon::ALL {
            if let Some(ret) = self.get(horizon) {
                weighted_sum += horizon.weight() * ret;
                weight_total += horizon.weight();
            }
        }
        if weight_total > 0.0 {
            Some(weighted_sum / weight_total)
        } else {
            None
        }
    }
}

/// Direction of a Mansfield oscillator zero crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroCross {
    /// Crossed from below zero to above: gaining relative strength.
    Bullish,
    /// Crossed from above zero to below: losing relative strength.
    Bearish,
}

/// Mansfield relative-strength oscillator reading against one benchmark.
///
/// The sign change is the notable event surfaced to downstream consumers,
/// not just the raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorReading {
    pub benchmark: String,
    pub value: f64,
    pub zero_cross: Option<ZeroCross>,
}

/// Relative-strength metrics for one instrument, computed fresh per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RsResult {
    /// Universe-relative percentile rank in [0, 99]. `None` when the
    /// instrument has insufficient price history.
    pub percentile: Option<u8>,
    pub returns: MomentumReturns,
    pub oscillators: Vec<OscillatorReading>,
    /// Trend confirmation scalar in [0, 100].
    pub trend_strength: Option<f64>,
    /// Annualized realized volatility, in percent.
    pub volatility: Option<f64>,
}

impl RsResult {
    /// The all-null result reported for instruments with insufficient
    /// price history.
    #[must_use]
    pub fn insufficient() -> Self {
        Self::default()
    }

    /// Returns true if no RS metric could be derived.
    #[must_use]
    pub fn is_insufficient(&self) -> bool {
        self.percentile.is_none()
            && self.returns.weighted_measure().is_none()
            && self.oscillators.is_empty()
    }
}

/// Quality score and its weighted sub-scores, all in [0, 100].
/// A sub-score whose constituents are all missing is `None` and its weight
/// is redistributed; it is never treated as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    pub overall: Option<f64>,
    pub profitability: Option<f64>,
    pub financial_health: Option<f64>,
    pub growth: Option<f64>,
    pub cash_generation: Option<f64>,
}

impl QualityResult {
    /// Returns true if any sub-score could be computed.
    #[must_use]
    pub const fn has_fundamentals(&self) -> bool {
        self.overall.is_some()
    }
}

/// Recommendation signal for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Watch,
    Avoid,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Watch => write!(f, "WATCH"),
            Self::Avoid => write!(f, "AVOID"),
        }
    }
}

/// Final blended score and classification for one instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeResult {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    /// Blended score in [0, 100], deterministic in the RS percentile and
    /// quality score under the active strategy weights.
    pub composite_score: f64,
    pub signal: Signal,
    /// Informational risk score, higher meaning riskier (volatility and
    /// leverage tiers). Never part of filtering or the composite blend.
    pub risk_score: Option<f64>,
    pub rs: RsResult,
    pub quality: QualityResult,
}

/// Run-level aggregates consumed by reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenSummary {
    /// Instruments supplied to the run.
    pub universe_size: usize,
    /// Instruments with enough history to receive a percentile.
    pub scored: usize,
    /// Instruments that survived filtering (before any result-count cap).
    pub matched: usize,
    pub buy_count: usize,
    pub watch_count: usize,
    pub avoid_count: usize,
    pub avg_rs_percentile: Option<f64>,
    pub avg_quality_score: Option<f64>,
    /// Result counts per sector, deterministically ordered.
    pub sector_counts: BTreeMap<String, usize>,
    /// Symbols excluded from ranking for lack of price history, still
    /// reported so the caller can surface them.
    pub insufficient_data: Vec<String>,
    /// Sector-vs-index oscillator readings, when that comparison level is
    /// enabled.
    pub sector_oscillators: Vec<OscillatorReading>,
}

/// Ordered results plus run-level summary: the complete output contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenOutcome {
    pub results: Vec<CompositeResult>,
    pub summary: ScreenSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_measure_uses_all_horizons() {
        let returns = MomentumReturns {
            one_month: Some(0.10),
            three_months: Some(0.10),
            six_months: Some(0.10),
            twelve_months: Some(0.10),
        };
        let measure = returns.weighted_measure().unwrap();
        assert!((measure - 0.10).abs() < 1e-12);
    }

    #[test]
    fn weighted_measure_renormalizes_over_available_horizons() {
        // Only 6M and 12M present: weights 0.30 and 0.40 renormalize to
        // 3/7 and 4/7.
        let returns = MomentumReturns {
            six_months: Some(0.07),
            twelve_months: Some(0.14),
            ..Default::default()
        };
        let measure = returns.weighted_measure().unwrap();
        let expected = (0.30 * 0.07 + 0.40 * 0.14) / 0.70;
        assert!((measure - expected).abs() < 1e-12);
    }

    #[test]
    fn weighted_measure_is_none_when_all_horizons_missing() {
        assert_eq!(MomentumReturns::default().weighted_measure(), None);
    }

    #[test]
    fn insufficient_result_is_all_null() {
        let result = RsResult::insufficient();
        assert!(result.is_insufficient());
        assert_eq!(result.percentile, None);
        assert_eq!(result.trend_strength, None);
    }

    #[test]
    fn signal_display_matches_report_labels() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::Watch.to_string(), "WATCH");
        assert_eq!(Signal::Avoid.to_string(), "AVOID");
    }

    #[test]
    fn outcome_round_trips_through_json() {
        let outcome = ScreenOutcome {
            results: vec![CompositeResult {
                symbol: "INFY".to_string(),
                name: "Infosys".to_string(),
                sector: "IT".to_string(),
                composite_score: 91.4,
                signal: Signal::Buy,
                risk_score: Some(20.0),
                rs: RsResult {
                    percentile: Some(99),
                    oscillators: vec![OscillatorReading {
                        benchmark: "NIFTY50".to_string(),
                        value: 4.2,
                        zero_cross: Some(ZeroCross::Bullish),
                    }],
                    ..Default::default()
                },
                quality: QualityResult {
                    overall: Some(85.0),
                    ..Default::default()
                },
            }],
            summary: ScreenSummary {
                universe_size: 1,
                scored: 1,
                matched: 1,
                buy_count: 1,
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&outcome).unwrap();
        let back: ScreenOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.results[0].symbol, "INFY");
        assert_eq!(back.results[0].signal, Signal::Buy);
        assert_eq!(back.results[0].rs.percentile, Some(99));
        assert_eq!(back.summary.buy_count, 1);
    }

    #[test]
    fn horizon_weights_favor_longer_horizons() {
        let mut previous = 0.0;
        for horizon in Horizon::ALL {
            assert!(horizon.weight() > previous);
            previous = horizon.weight();
        }
        let total: f64 = Horizon::ALL.iter().map(|h| h.weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
