use crate::models::DenseSeries;

/// Trailing rolling mean that never drops leading values.
///
/// The output at index `i` averages `values[i + 1 - window ..= i]`, or every
/// value seen so far while fewer than `window` exist. A `window` of 0 is
/// treated as 1.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);

    // Running sum; subtract the value that falls out of the window.
    values
        .iter()
        .enumerate()
        .scan(0.0_f64, move |sum, (i, &v)| {
            *sum += v;
            if i >= window {
                *sum -= values[i - window];
            }
            let seen = (i + 1).min(window);
            Some(*sum / seen as f64)
        })
        .collect()
}

/// Smoothed view of a dense series, one output per day.
pub fn smooth(series: &DenseSeries, window: usize) -> Vec<f64> {
    rolling_mean(&series.values, window)
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
