use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{DenseSeries, RawObservation};

pub const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Expand sparse `(date, count)` observations into one value per calendar day.
///
/// Counts sharing a date are summed across categories, days without an
/// observation become 0 and observations outside `[start, end]` are dropped.
/// An inverted range yields an empty series.
pub fn fill(raw: &[RawObservation], start: NaiveDate, end: NaiveDate) -> DenseSeries {
    if start > end {
        return DenseSeries::default();
    }

    let daily: HashMap<NaiveDate, u64> = raw
        .iter()
        .filter(|obs| obs.date >= start && obs.date <= end)
        .fold(HashMap::new(), |mut acc, obs| {
            *acc.entry(obs.date).or_insert(0) += obs.count;
            acc
        });

    let (labels, values) = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            let value = daily.get(&day).copied().unwrap_or(0) as f64;
            (day.format(LABEL_FORMAT).to_string(), value)
        })
        .unzip();

    DenseSeries { labels, values }
}
