//! Mansfield relative-strength oscillator.
//!
//! The oscillator normalizes the stock/benchmark price ratio by its own
//! trailing moving average and expresses it as a percentage deviation from
//! zero: positive values mean the instrument is gaining relative strength
//! against the benchmark. A zero crossing is the event downstream
//! consumers care about, so the reading carries it alongside the raw
//! value.

use rs_screener_core::{OscillatorReading, PriceSeries, ZeroCross};
use rust_decimal::prelude::ToPrimitive;

/// Intersects two series on shared timestamps and returns the
/// stock/benchmark close ratios, oldest first.
fn aligned_ratios(stock: &PriceSeries, benchmark: &PriceSeries) -> Vec<f64> {
    let a = stock.points();
    let b = benchmark.points();
    let mut ratios = Vec::with_capacity(a.len().min(b.len()));

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].timestamp.cmp(&b[j].timestamp) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                if b[j].close > rust_decimal::Decimal::ZERO {
                    if let Some(ratio) = (a[i].close / b[j].close).to_f64() {
                        ratios.push(ratio);
                    }
                }
                i += 1;
                j += 1;
            }
        }
    }

    ratios
}

/// Oscillator value at `end` (inclusive): percentage deviation of the
/// ratio from its trailing `window`-period moving average.
fn value_at(ratios: &[f64], end: usize, window: usize) -> Option<f64> {
    if end + 1 < window {
        return None;
    }
    let slice = &ratios[end + 1 - window..=end];
    let ma = slice.iter().sum::<f64>() / window as f64;
    if ma.abs() < f64::EPSILON {
        return None;
    }
    Some((ratios[end] / ma - 1.0) * 100.0)
}

/// Computes the Mansfield oscillator reading for one instrument against
/// one benchmark.
///
/// Requires at least `window` shared observations; the zero-cross flag
/// additionally needs one more period for the previous value. Returns
/// `None` when the aligned history is too short.
#[must_use]
pub fn mansfield_reading(
    benchmark_name: &str,
    stock: &PriceSeries,
    benchmark: &PriceSeries,
    window: usize,
) -> Option<OscillatorReading> {
    let ratios = aligned_ratios(stock, benchmark);
    if ratios.len() < window {
        return None;
    }

    let last = ratios.len() - 1;
    let value = value_at(&ratios, last, window)?;
    let previous = if last >= 1 {
        value_at(&ratios, last - 1, window)
    } else {
        None
    };

    let zero_cross = previous.and_then(|prev| {
        if prev < 0.0 && value > 0.0 {
            Some(ZeroCross::Bullish)
        } else if prev > 0.0 && value < 0.0 {
            Some(ZeroCross::Bearish)
        } else {
            None
        }
    });

    Some(OscillatorReading {
        benchmark: benchmark_name.to_string(),
        value,
        zero_cross,
    })
}
