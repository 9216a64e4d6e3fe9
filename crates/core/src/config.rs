//! Screening configuration and its loader.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::debug;

use crate::error::ScreenerError;
use crate::score::Horizon;

/// Strategy weighting variants. The set is fixed and small, so it is a
/// closed enum rather than open-ended dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// 60% RS, 40% quality (standard sub-scoring).
    #[default]
    RsQuality,
    /// 60% RS, 40% quality with value-tilted sub-scoring.
    RsValue,
    /// 60% RS, 40% quality with volatility-tilted sub-scoring.
    RsLowVolatility,
    /// 100% RS; quality is informational only.
    PureRs,
}

impl Strategy {
    /// Weight of the RS percentile in the composite score.
    #[must_use]
    pub const fn rs_weight(self) -> f64 {
        match self {
            Self::PureRs => 1.0,
            _ => 0.60,
        }
    }

    /// Weight of the quality score in the composite score.
    #[must_use]
    pub const fn quality_weight(self) -> f64 {
        match self {
            Self::PureRs => 0.0,
            _ => 0.40,
        }
    }

    /// Returns true if the quality score is a mandatory composite
    /// component under this strategy.
    #[must_use]
    pub const fn requires_quality(self) -> bool {
        !matches!(self, Self::PureRs)
    }
}

impl FromStr for Strategy {
    type Err = ScreenerError;

    /// Accepts both the config identifiers and the display names used by
    /// the screening UI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rs-quality" | "RS + Quality" => Ok(Self::RsQuality),
            "rs-value" | "RS + Value" => Ok(Self::RsValue),
            "rs-low-volatility" | "RS + Low Volatility" => Ok(Self::RsLowVolatility),
            "pure-rs" | "Pure RS" => Ok(Self::PureRs),
            other => Err(ScreenerError::InvalidConfiguration(format!(
                "unknown strategy '{other}'"
            ))),
        }
    }
}

/// Which relative-strength comparisons to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonLevels {
    pub stock_vs_index: bool,
    pub stock_vs_sector: bool,
    pub sector_vs_index: bool,
}

impl Default for ComparisonLevels {
    fn default() -> Self {
        Self {
            stock_vs_index: true,
            stock_vs_sector: true,
            sector_vs_index: true,
        }
    }
}

/// Optional per-ratio bounds applied during filtering. An instrument with
/// a missing ratio is never disqualified by that ratio's bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalBounds {
    pub min_roe: Option<f64>,
    pub max_debt_to_equity: Option<f64>,
    pub min_operating_margin: Option<f64>,
}

/// Configuration accepted by the composite ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    pub strategy: Strategy,
    /// RS percentile floor, in [0, 99].
    pub min_rs_percentile: u8,
    /// Quality score floor, in [0, 100]. Ignored under Pure RS, where the
    /// quality score is not a composite component.
    pub min_quality_score: f64,
    pub bounds: FundamentalBounds,
    pub comparisons: ComparisonLevels,
    /// Cap on the number of ranked results returned.
    pub max_results: Option<usize>,
    /// Trailing moving-average window of the Mansfield oscillator, in
    /// observations.
    pub oscillator_window: usize,
    /// Trailing window for realized volatility, in daily returns.
    pub volatility_window: usize,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            min_rs_percentile: 80,
            min_quality_score: 40.0,
            bounds: FundamentalBounds::default(),
            comparisons: ComparisonLevels::default(),
            max_results: None,
            oscillator_window: 252,
            volatility_window: 60,
        }
    }
}

impl ScreenerConfig {
    /// Validates thresholds before any scoring begins.
    ///
    /// # Errors
    /// Returns `ScreenerError::InvalidConfiguration` for any out-of-range
    /// value.
    pub fn validate(&self) -> Result<(), ScreenerError> {
        if self.min_rs_percentile > 99 {
            return Err(ScreenerError::InvalidConfiguration(format!(
                "min_rs_percentile must be in [0, 99], got {}",
                self.min_rs_percentile
            )));
        }
        if !(0.0..=100.0).contains(&self.min_quality_score) {
            return Err(ScreenerError::InvalidConfiguration(format!(
                "min_quality_score must be in [0, 100], got {}",
                self.min_quality_score
            )));
        }
        if self.oscillator_window < 2 {
            return Err(ScreenerError::InvalidConfiguration(format!(
                "oscillator_window must be at least 2, got {}",
                self.oscillator_window
            )));
        }
        if self.volatility_window < 2 {
            return Err(ScreenerError::InvalidConfiguration(format!(
                "volatility_window must be at least 2, got {}",
                self.volatility_window
            )));
        }
        if self.max_results == Some(0) {
            return Err(ScreenerError::InvalidConfiguration(
                "max_results must be at least 1 when set".to_string(),
            ));
        }
        if let Some(max_de) = self.bounds.max_debt_to_equity {
            if max_de < 0.0 {
                return Err(ScreenerError::InvalidConfiguration(format!(
                    "max_debt_to_equity must be non-negative, got {max_de}"
                )));
            }
        }
        Ok(())
    }

    /// The minimum price history required for full RS metrics: one
    /// observation beyond the longest momentum horizon.
    #[must_use]
    pub const fn min_price_points() -> usize {
        Horizon::TwelveMonths.trading_days() + 1
    }
}

/// Loads screener configuration from a TOML file merged with
/// `SCREENER_`-prefixed environment variables.
pub struct ConfigLoader;

impl ConfigLoader {
    /// # Errors
    /// Returns an error if the configuration cannot be read or parsed.
    pub fn load() -> Result<ScreenerConfig> {
        let config: ScreenerConfig = Figment::new()
            .merge(Toml::file("config/Screener.toml"))
            .merge(Env::prefixed("SCREENER_"))
            .extract()?;
        debug!(strategy = ?config.strategy, "configuration loaded");
        Ok(config)
    }

    /// # Errors
    /// Returns an error if the configuration cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<ScreenerConfig> {
        let config: ScreenerConfig = Figment::new()
            .merge(Toml::file("config/Screener.toml"))
            .merge(Toml::file(format!("config/Screener.{profile}.toml")))
            .merge(Env::prefixed("SCREENER_"))
            .extract()?;
        debug!(profile, strategy = ?config.strategy, "configuration loaded");
        Ok(config)
    }
}
