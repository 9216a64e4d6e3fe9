//! Informational risk scoring.
//!
//! Tiers realized volatility and balance-sheet leverage into a single
//! score, higher meaning riskier: volatility contributes up to 40 points
//! and leverage up to 30. The score never enters the composite or the
//! filters; it rides along on each result so the report layer can flag
//! hot names.

use rs_screener_core::FundamentalsSnapshot;

/// Risk points from annualized volatility (percent), up to 40.
fn volatility_risk(volatility: f64) -> f64 {
    if volatility > 40.0 {
        40.0
    } else if volatility > 30.0 {
        30.0
    } else if volatility > 20.0 {
        20.0
    } else if volatility > 15.0 {
        10.0
    } else {
        0.0
    }
}

/// Risk points from debt-to-equity, up to 30.
fn leverage_risk(debt_to_equity: f64) -> f64 {
    if debt_to_equity > 2.0 {
        30.0
    } else if debt_to_equity > 1.5 {
        20.0
    } else if debt_to_equity > 1.0 {
        10.0
    } else {
        0.0
    }
}

/// Combined risk score, `None` when neither input is known. A known-calm
/// or known-unlevered instrument contributes zero points; a missing
/// component contributes nothing rather than voiding the score.
#[must_use]
pub fn risk_score(
    volatility: Option<f64>,
    fundamentals: Option<&FundamentalsSnapshot>,
) -> Option<f64> {
    let debt_to_equity = fundamentals.and_then(|f| f.debt_to_equity);
    if volatility.is_none() && debt_to_equity.is_none() {
        return None;
    }

    let score =
        volatility.map_or(0.0, volatility_risk) + debt_to_equity.map_or(0.0, leverage_risk);
    Some(score.min(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leveraged(debt_to_equity: f64) -> FundamentalsSnapshot {
        FundamentalsSnapshot {
            debt_to_equity: Some(debt_to_equity),
            ..Default::default()
        }
    }

    #[test]
    fn risk_rises_with_volatility() {
        let mut previous = -1.0;
        for vol in [5.0, 16.0, 21.0, 31.0, 41.0, 90.0] {
            let score = risk_score(Some(vol), None).unwrap();
            assert!(score >= previous);
            previous = score;
        }
        assert_eq!(risk_score(Some(90.0), None), Some(40.0));
    }

    #[test]
    fn risk_rises_with_leverage() {
        let mut previous = -1.0;
        for de in [0.2, 1.1, 1.6, 2.1, 5.0] {
            let score = risk_score(None, Some(&leveraged(de))).unwrap();
            assert!(score >= previous);
            previous = score;
        }
        assert_eq!(risk_score(None, Some(&leveraged(5.0))), Some(30.0));
    }

    #[test]
    fn components_add_up() {
        assert_eq!(risk_score(Some(45.0), Some(&leveraged(2.5))), Some(70.0));
        assert_eq!(risk_score(Some(10.0), Some(&leveraged(2.5))), Some(30.0));
        assert_eq!(risk_score(Some(45.0), Some(&leveraged(0.2))), Some(40.0));
    }

    #[test]
    fn unknown_inputs_yield_no_score() {
        assert_eq!(risk_score(None, None), None);
        assert_eq!(risk_score(None, Some(&FundamentalsSnapshot::default())), None);
    }
}
