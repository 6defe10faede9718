//! Equity-curve metrics: pure functions over per-trade P&L sequences.
//!
//! Every metric is a pure function: sequence in, sequence or scalar out.
//! No dependencies on the runner, data pipeline, or simulator.

/// Round to 2 decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running sum of `values`.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |sum, v| {
            *sum += v;
            Some(*sum)
        })
        .collect()
}

/// Running maximum seeded at 0.
///
/// Seeding at zero rather than at the first value means a losing first
/// trade already shows as drawdown.
pub fn running_max(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0_f64, |peak, &v| {
            if v > *peak {
                *peak = v;
            }
            Some(*peak)
        })
        .collect()
}

/// Pointwise `cumulative - running_max`. Always ≤ 0.
pub fn drawdown_series(cumulative: &[f64], peaks: &[f64]) -> Vec<f64> {
    cumulative
        .iter()
        .zip(peaks)
        .map(|(c, p)| c - p)
        .collect()
}

/// Minimum of the drawdown series, `None` when it is empty.
pub fn max_drawdown(drawdowns: &[f64]) -> Option<f64> {
    drawdowns.iter().copied().reduce(f64::min)
}
