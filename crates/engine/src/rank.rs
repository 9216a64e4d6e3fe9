//! Universe-wide percentile ranking.
//!
//! Ranking is an explicit two-pass batch operation: the per-instrument
//! momentum measures are computed first, then ranked here in one pass over
//! the whole universe. Instruments without a defined measure are excluded
//! from the denominator but keep their slot in the output.

/// Calculates 1-based ascending ranks, assigning tied values the average
/// of the ranks they span.
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_unstable_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len()
            && (values[order[end]] - values[order[start]]).abs() < f64::EPSILON
        {
            end += 1;
        }

        // Positions start..end occupy ranks start+1 ..= end; ties share
        // the midpoint.
        let shared = (start + 1 + end) as f64 / 2.0;
        for &slot in &order[start..end] {
            ranks[slot] = shared;
        }
        start = end;
    }

    ranks
}

/// Converts momentum measures into universe-relative percentiles in
/// [0, 99].
///
/// Instruments are ranked ascending by measure; percentile =
/// `round((rank - 1) / (count - 1) * 99)`, so the weakest instrument gets
/// 0 and the strongest 99. Ties share the same (average-rank) percentile.
/// A universe with a single scored instrument gets 99. `None` measures
/// stay `None` and do not enter the denominator.
#[must_use]
pub fn percentiles(measures: &[Option<f64>]) -> Vec<Option<u8>> {
    let mut out = vec![None; measures.len()];

    let defined: Vec<(usize, f64)> = measures
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.map(|v| (i, v)))
        .collect();

    let count = defined.len();
    if count == 0 {
        return out;
    }
    if count == 1 {
        out[defined[0].0] = Some(99);
        return out;
    }

    let values: Vec<f64> = defined.iter().map(|(_, v)| *v).collect();
    let ranks = average_ranks(&values);

    for ((slot, _), rank) in defined.iter().zip(ranks.iter()) {
        let pct = ((rank - 1.0) / (count as f64 - 1.0) * 99.0).round();
        out[*slot] = Some(pct.clamp(0.0, 99.0) as u8);
    }

    out
}
