//! Fundamentals-derived quality scoring.
//!
//! Each sub-score maps its constituent ratios through a monotone step
//! ladder into [0, 100] and averages whichever constituents are present.
//! A sub-score with no available constituent is `None` and its weight is
//! redistributed proportionally over the remaining sub-scores, so a
//! missing ratio is never penalized as "bad".

use rs_screener_core::{FundamentalsSnapshot, QualityResult, Strategy};

/// Relative weights of the four sub-scores. Re-normalized at scoring time
/// over whichever sub-scores are available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityWeights {
    pub profitability: f64,
    pub financial_health: f64,
    pub growth: f64,
    pub cash_generation: f64,
}

impl QualityWeights {
    /// Standard weighting: profitability 0.40, financial health 0.30,
    /// growth 0.20, cash generation 0.10.
    pub const STANDARD: Self = Self {
        profitability: 0.40,
        financial_health: 0.30,
        growth: 0.20,
        cash_generation: 0.10,
    };

    /// Value tilt: emphasizes balance-sheet strength and cash generation
    /// over growth.
    pub const VALUE_TILT: Self = Self {
        profitability: 0.25,
        financial_health: 0.35,
        growth: 0.10,
        cash_generation: 0.30,
    };

    /// Low-volatility tilt: leans hardest on financial health, the most
    /// stable of the four factors.
    pub const LOW_VOLATILITY_TILT: Self = Self {
        profitability: 0.25,
        financial_health: 0.45,
        growth: 0.10,
        cash_generation: 0.20,
    };

    /// The sub-scoring variant used by a strategy.
    #[must_use]
    pub const fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::RsQuality | Strategy::PureRs => Self::STANDARD,
            Strategy::RsValue => Self::VALUE_TILT,
            Strategy::RsLowVolatility => Self::LOW_VOLATILITY_TILT,
        }
    }
}

/// Maps a higher-is-better ratio onto {0, 25, 50, 75, 100} using four
/// ascending thresholds.
fn ladder_up(value: f64, steps: [f64; 4]) -> f64 {
    if value >= steps[3] {
        100.0
    } else if value >= steps[2] {
        75.0
    } else if value >= steps[1] {
        50.0
    } else if value >= steps[0] {
        25.0
    } else {
        0.0
    }
}

/// Maps a lower-is-better ratio onto {0, 25, 50, 75, 100} using four
/// ascending thresholds.
fn ladder_down(value: f64, steps: [f64; 4]) -> f64 {
    if value <= steps[0] {
        100.0
    } else if value <= steps[1] {
        75.0
    } else if value <= steps[2] {
        50.0
    } else if value <= steps[3] {
        25.0
    } else {
        0.0
    }
}

/// Averages the available constituents; `None` when all are missing.
fn average_available(parts: &[Option<f64>]) -> Option<f64> {
    let available: Vec<f64> = parts.iter().flatten().copied().collect();
    if available.is_empty() {
        None
    } else {
        Some(available.iter().sum::<f64>() / available.len() as f64)
    }
}

/// Computes quality scores from fundamentals snapshots.
#[derive(Debug, Clone)]
pub struct QualityEngine {
    weights: QualityWeights,
}

impl QualityEngine {
    #[must_use]
    pub const fn new(strategy: Strategy) -> Self {
        Self {
            weights: QualityWeights::for_strategy(strategy),
        }
    }

    #[must_use]
    pub const fn weights(&self) -> &QualityWeights {
        &self.weights
    }

    /// Scores one instrument's fundamentals. An absent or empty snapshot
    /// yields an all-null result.
    #[must_use]
    pub fn score(&self, fundamentals: Option<&FundamentalsSnapshot>) -> QualityResult {
        let Some(f) = fundamentals else {
            return QualityResult::default();
        };

        let profitability = average_available(&[
            f.roe.map(|v| ladder_up(v, [5.0, 10.0, 15.0, 20.0])),
            f.roa.map(|v| ladder_up(v, [3.0, 5.0, 7.0, 10.0])),
            f.operating_margin.map(|v| ladder_up(v, [5.0, 10.0, 15.0, 20.0])),
        ]);

        let financial_health = average_available(&[
            f.debt_to_equity.map(|v| ladder_down(v, [0.3, 0.5, 1.0, 2.0])),
            f.current_ratio.map(|v| ladder_up(v, [0.5, 1.0, 1.5, 2.0])),
        ]);

        let growth = average_available(&[
            f.revenue_growth.map(|v| ladder_up(v, [5.0, 10.0, 15.0, 20.0])),
            f.earnings_growth.map(|v| ladder_up(v, [10.0, 15.0, 20.0, 25.0])),
        ]);

        let cash_generation = average_available(&[
            f.fcf_yield.map(|v| ladder_up(v, [0.0, 2.5, 5.0, 7.5])),
        ]);

        let overall = self.blend(profitability, financial_health, growth, cash_generation);

        QualityResult {
            overall,
            profitability,
            financial_health,
            growth,
            cash_generation,
        }
    }

    /// Weighted sum over the available sub-scores, with weights
    /// re-normalized to sum to 1 over whichever sub-scores are present.
    fn blend(
        &self,
        profitability: Option<f64>,
        financial_health: Option<f64>,
        growth: Option<f64>,
        cash_generation: Option<f64>,
    ) -> Option<f64> {
        let weighted = [
            (profitability, self.weights.profitability),
            (financial_health, self.weights.financial_health),
            (growth, self.weights.growth),
            (cash_generation, self.weights.cash_generation),
        ];

        let mut score_sum = 0.0;
        let mut weight_sum = 0.0;
        for (sub_score, weight) in weighted {
            if let Some(s) = sub_score {
                score_sum += weight * s;
                weight_sum += weight;
            }
        }

        if weight_sum > 0.0 {
            Some(score_sum / weight_sum)
        } else {
            None
        }
    }
}
