//! End-to-end screening scenario: three instruments with known momentum
//! and quality profiles ranked under the RS + Quality strategy.

use chrono::{DateTime, TimeZone, Utc};
use rs_screener_core::{
    Benchmark, BenchmarkKind, FundamentalsSnapshot, Instrument, PricePoint, PriceSeries,
    ScreenerConfig, Signal, Strategy,
};
use rs_screener_engine::Screener;
use rust_decimal::Decimal;

fn ts(day: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(day * 86_400, 0).unwrap()
}

/// 253 daily points rising linearly from 100 to `100 * (1 + total_return)`,
/// so the 12-month return is exactly `total_return`.
fn year_series(total_return: f64) -> PriceSeries {
    let end = 100.0 * (1.0 + total_return);
    let points = (0..253)
        .map(|i| {
            let price = 100.0 + (end - 100.0) * i as f64 / 252.0;
            PricePoint::new(ts(i as i64), Decimal::try_from(price).unwrap())
        })
        .collect();
    PriceSeries::new(points).unwrap()
}

fn strong_fundamentals() -> FundamentalsSnapshot {
    FundamentalsSnapshot {
        roe: Some(22.0),
        roa: Some(12.0),
        operating_margin: Some(24.0),
        debt_to_equity: Some(0.4),
        current_ratio: Some(1.6),
        revenue_growth: Some(16.0),
        earnings_growth: Some(22.0),
        fcf_yield: Some(5.5),
    }
}

fn average_fundamentals() -> FundamentalsSnapshot {
    FundamentalsSnapshot {
        roe: Some(11.0),
        roa: Some(5.5),
        operating_margin: Some(11.0),
        debt_to_equity: Some(0.9),
        current_ratio: Some(1.2),
        revenue_growth: Some(11.0),
        earnings_growth: Some(16.0),
        fcf_yield: Some(2.6),
    }
}

fn weak_fundamentals() -> FundamentalsSnapshot {
    FundamentalsSnapshot {
        roe: Some(6.0),
        roa: Some(3.5),
        operating_margin: Some(6.0),
        debt_to_equity: Some(1.8),
        current_ratio: Some(0.6),
        revenue_growth: Some(2.0),
        earnings_growth: Some(5.0),
        fcf_yield: Some(-1.0),
    }
}

fn universe() -> Vec<Instrument> {
    vec![
        Instrument::new(
            "LEADER",
            "Leader Ltd",
            "IT",
            year_series(0.30),
            Some(strong_fundamentals()),
        ),
        Instrument::new(
            "MIDDLE",
            "Middle Ltd",
            "IT",
            year_series(0.10),
            Some(average_fundamentals()),
        ),
        Instrument::new(
            "LAGGARD",
            "Laggard Ltd",
            "AUTO",
            year_series(-0.05),
            Some(weak_fundamentals()),
        ),
    ]
}

fn open_config(strategy: Strategy) -> ScreenerConfig {
    ScreenerConfig {
        strategy,
        min_rs_percentile: 0,
        min_quality_score: 0.0,
        oscillator_window: 52,
        ..Default::default()
    }
}

#[test]
fn rs_quality_ranks_momentum_and_quality_in_order() {
    let screener = Screener::new(open_config(Strategy::RsQuality)).unwrap();
    let benchmarks = vec![Benchmark::new(
        "NIFTY50",
        BenchmarkKind::Index,
        year_series(0.08),
    )];

    let outcome = screener.run(&universe(), &benchmarks).unwrap();

    let symbols: Vec<&str> = outcome.results.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["LEADER", "MIDDLE", "LAGGARD"]);

    let leader = &outcome.results[0];
    assert_eq!(leader.signal, Signal::Buy);
    assert_eq!(leader.rs.percentile, Some(99));
    let twelve_month = leader.rs.returns.twelve_months.unwrap();
    assert!((twelve_month - 0.30).abs() < 1e-9);

    // The leader outpaces the benchmark, so its oscillator reads positive.
    assert_eq!(leader.rs.oscillators.len(), 1);
    assert!(leader.rs.oscillators[0].value > 0.0);

    // Smooth series, low leverage: no risk points. The laggard's 1.8
    // debt-to-equity alone puts it in a higher risk tier.
    assert_eq!(leader.risk_score, Some(0.0));
    assert_eq!(outcome.results[2].risk_score, Some(20.0));

    assert_eq!(outcome.summary.universe_size, 3);
    assert_eq!(outcome.summary.matched, 3);
    assert_eq!(outcome.summary.buy_count, 1);
    assert!(outcome.summary.insufficient_data.is_empty());
}

#[test]
fn pure_rs_ignores_quality_entirely() {
    let screener = Screener::new(open_config(Strategy::PureRs)).unwrap();

    // Swap fundamentals so the momentum laggard has the best quality.
    let mut instruments = universe();
    instruments[0].fundamentals = Some(weak_fundamentals());
    instruments[2].fundamentals = Some(strong_fundamentals());

    let outcome = screener.run(&instruments, &[]).unwrap();

    let symbols: Vec<&str> = outcome.results.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["LEADER", "MIDDLE", "LAGGARD"]);

    for result in &outcome.results {
        let percentile = f64::from(result.rs.percentile.unwrap());
        assert!((result.composite_score - percentile).abs() < 1e-12);
    }
}

#[test]
fn identical_inputs_reproduce_identical_outcomes() {
    let screener = Screener::new(open_config(Strategy::RsQuality)).unwrap();
    let instruments = universe();

    let first = screener.run(&instruments, &[]).unwrap();
    let second = screener.run(&instruments, &[]).unwrap();

    assert_eq!(first.results.len(), second.results.len());
    for (a, b) in first.results.iter().zip(second.results.iter()) {
        assert_eq!(a.symbol, b.symbol);
        assert_eq!(a.signal, b.signal);
        assert!((a.composite_score - b.composite_score).abs() < f64::EPSILON);
        assert_eq!(a.rs.percentile, b.rs.percentile);
    }
    assert_eq!(first.summary.sector_counts, second.summary.sector_counts);
}

#[test]
fn insufficient_history_is_reported_alongside_ranked_results() {
    let screener = Screener::new(open_config(Strategy::PureRs)).unwrap();

    let mut instruments = universe();
    let short_points = (0..40)
        .map(|i| PricePoint::new(ts(i), Decimal::from(100 + i)))
        .collect();
    instruments.push(Instrument::new(
        "RECENT_IPO",
        "Recent IPO Ltd",
        "IT",
        PriceSeries::new(short_points).unwrap(),
        None,
    ));

    let outcome = screener.run(&instruments, &[]).unwrap();

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(
        outcome.summary.insufficient_data,
        vec!["RECENT_IPO".to_string()]
    );
    assert_eq!(outcome.summary.scored, 3);
    assert_eq!(outcome.summary.universe_size, 4);
}
