use crate::models::{DenseSeries, Momentum, MomentumResult, Trend, TrendResult};
use crate::services::indicators::{mean, round2};

/// Second half must exceed the first by more than this factor to count as `Up`.
const UP_FACTOR: f64 = 1.1;
const DOWN_FACTOR: f64 = 0.9;

/// Week-over-week growth (percent) beyond which traffic is moving.
const MOMENTUM_THRESHOLD: f64 = 5.0;
const MOMENTUM_WINDOW: usize = 7;

/// Sums of `values[..len/2]` and `values[len/2..]`.
fn half_sums(values: &[f64]) -> (f64, f64) {
    let mid = values.len() / 2;
    let first = values[..mid].iter().sum();
    let second = values[mid..].iter().sum();
    (first, second)
}

fn percent_change(first: f64, second: f64) -> f64 {
    if first > 0.0 {
        round2((second - first) / first * 100.0)
    } else {
        0.0
    }
}

/// Compare the first and second halves of a dense series.
///
/// Odd lengths put the extra day in the second half. The label is decided on
/// the raw sums; `change_percent` is rounded to two decimals.
pub fn classify(series: DenseSeries) -> TrendResult {
    let (first, second) = half_sums(&series.values);

    let trend = if second > first * UP_FACTOR {
        Trend::Up
    } else if second < first * DOWN_FACTOR {
        Trend::Down
    } else {
        Trend::Stable
    };

    TrendResult {
        change_percent: percent_change(first, second),
        trend,
        series,
    }
}

/// Half-over-half growth for the dashboard metrics; 0 with fewer than two values.
pub fn growth_rate(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let (first, second) = half_sums(values);
    percent_change(first, second)
}

/// Last seven days against the seven before them.
///
/// The previous window is the first seven of the last fourteen values, so on
/// short series the two windows overlap. Returns `None` for an empty series.
pub fn momentum(values: &[f64]) -> Option<MomentumResult> {
    if values.is_empty() {
        return None;
    }

    let recent = &values[values.len().saturating_sub(MOMENTUM_WINDOW)..];
    let last_two_weeks = &values[values.len().saturating_sub(MOMENTUM_WINDOW * 2)..];
    let previous = &last_two_weeks[..last_two_weeks.len().min(MOMENTUM_WINDOW)];

    let recent_avg = mean(recent);
    let previous_avg = mean(previous);

    let growth = if previous_avg > 0.0 {
        (recent_avg - previous_avg) / previous_avg * 100.0
    } else {
        0.0
    };

    let direction = if growth > MOMENTUM_THRESHOLD {
        Momentum::Increasing
    } else if growth < -MOMENTUM_THRESHOLD {
        Momentum::Decreasing
    } else {
        Momentum::Stable
    };

    Some(MomentumResult {
        direction,
        growth_rate: round2(growth),
        recent_avg: round2(recent_avg),
        previous_avg: round2(previous_avg),
    })
}
