use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::models::{
    ForecastConfidence, ForecastOutcome, ForecastPoint, MonthlyCount, MonthlyRevenue, RevenueEstimate,
    RevenueModel, ServiceMonthCount, MIN_FORECAST_HISTORY,
};
use crate::services::indicators::round2;

pub const PERIOD_LABEL_FORMAT: &str = "%Y-%m";

/// Project monthly inquiry counts forward by the average month-over-month delta.
///
/// Needs at least three months of history; anything shorter produces
/// `ForecastOutcome::InsufficientData`. Step `i` (1-based) projects
/// `max(0, last + avg_delta * i)`, labelled `i` calendar months after `from`.
/// Counts round half to even. Revenue is taken from the unrounded projection
/// at the model's default rate, since projections carry no service split.
pub fn forecast(
    history: &[MonthlyCount],
    periods_ahead: u32,
    from: NaiveDate,
    model: &RevenueModel,
) -> ForecastOutcome {
    if history.len() < MIN_FORECAST_HISTORY {
        debug!("Skipping forecast: {} months of history", history.len());
        return ForecastOutcome::insufficient(history.len());
    }

    let counts: Vec<f64> = history.iter().map(|m| m.count as f64).collect();
    let avg_growth = counts.windows(2).map(|w| w[1] - w[0]).sum::<f64>() / (counts.len() - 1) as f64;
    let last = counts[counts.len() - 1];

    let points = (1..=periods_ahead)
        .map_while(|step| {
            let label = from.checked_add_months(Months::new(step))?;
            let projected = (last + avg_growth * f64::from(step)).max(0.0);
            Some(ForecastPoint {
                period_label: label.format(PERIOD_LABEL_FORMAT).to_string(),
                projected_count: projected.round_ties_even() as u64,
                projected_revenue: round2(projected * model.default_rate),
            })
        })
        .collect();

    ForecastOutcome::Projected {
        points,
        confidence: ForecastConfidence::for_history_len(history.len()),
    }
}

/// Estimated revenue per month: `Σ count × service rate × conversion factor`.
///
/// Months come back in ascending order; per-month figures and both summary
/// figures are rounded to cents.
pub fn estimate_revenue(rows: &[ServiceMonthCount], model: &RevenueModel) -> RevenueEstimate {
    let by_month: BTreeMap<&str, f64> = rows.iter().fold(BTreeMap::new(), |mut acc, row| {
        let value = row.count.max(0) as f64 * model.rate_for(row.service.as_deref()) * model.conversion_factor;
        *acc.entry(row.month.as_str()).or_insert(0.0) += value;
        acc
    });

    let total: f64 = by_month.values().sum();
    let avg_monthly = total / by_month.len().max(1) as f64;

    RevenueEstimate {
        total_estimated: round2(total),
        avg_monthly: round2(avg_monthly),
        months: by_month
            .into_iter()
            .map(|(month, value)| MonthlyRevenue {
                month: month.to_string(),
                estimated_revenue: round2(value),
            })
            .collect(),
    }
}
