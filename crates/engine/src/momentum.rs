//! Per-instrument momentum metrics: horizon returns, trend strength, and
//! realized volatility.
//!
//! Everything here is a pure function over one price series; the only
//! cross-instrument computation (percentile ranking) lives in `rank`.

use rs_screener_core::{Horizon, MomentumReturns, PriceSeries};
use rust_decimal::prelude::ToPrimitive;

/// Simple return over the last `days` observations:
/// `(price_now / price_days_ago) - 1`.
///
/// Returns `None` when the series is too short or the historical price is
/// non-positive; a missing horizon is never reported as zero.
#[must_use]
pub fn horizon_return(series: &PriceSeries, days: usize) -> Option<f64> {
    let now = series.last_close()?;
    let then = series.close_n_back(days)?;
    if then <= rust_decimal::Decimal::ZERO {
        return None;
    }
    let ratio = (now / then).to_f64()?;
    Some(ratio - 1.0)
}

/// Computes the simple return at every momentum horizon.
#[must_use]
pub fn momentum_returns(series: &PriceSeries) -> MomentumReturns {
    MomentumReturns {
        one_month: horizon_return(series, Horizon::OneMonth.trading_days()),
        three_months: horizon_return(series, Horizon::ThreeMonths.trading_days()),
        six_months: horizon_return(series, Horizon::SixMonths.trading_days()),
        twelve_months: horizon_return(series, Horizon::TwelveMonths.trading_days()),
    }
}

/// Trend strength in [0, 100]: the horizon-weight share of available
/// horizons whose return is positive.
///
/// Monotonically non-decreasing as more horizons confirm the upward
/// direction. `None` when no horizon return is available.
#[must_use]
pub fn trend_strength(returns: &MomentumReturns) -> Option<f64> {
    let mut positive_weight = 0.0;
    let mut available_weight = 0.0;
    for horizon in Horizon::ALL {
        if let Some(ret) = returns.get(horizon) {
            available_weight += horizon.weight();
            if ret > 0.0 {
                positive_weight += horizon.weight();
            }
        }
    }
    if available_weight > 0.0 {
        Some(positive_weight / available_weight * 100.0)
    } else {
        None
    }
}

/// Annualized realized volatility over the trailing `window` daily
/// returns, in percent. `None` when fewer than `window` returns exist.
#[must_use]
pub fn realized_volatility(series: &PriceSeries, window: usize) -> Option<f64> {
    let points = series.points();
    if window < 2 || points.len() < window + 1 {
        return None;
    }

    let mut daily_returns = Vec::with_capacity(window);
    for pair in points[points.len() - window - 1..].windows(2) {
        let prev = pair[0].close;
        if prev <= rust_decimal::Decimal::ZERO {
            return None;
        }
        let ratio = (pair[1].close / prev).to_f64()?;
        daily_returns.push(ratio - 1.0);
    }

    let n = daily_returns.len() as f64;
    let mean = daily_returns.iter().sum::<f64>() / n;
    let variance = daily_returns
        .iter()
        .map(|r| (r - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    Some(variance.sqrt() * 252.0_f64.sqrt() * 100.0)
}
