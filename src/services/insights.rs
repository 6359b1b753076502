//! Plain-language observations for the admin dashboard.
//!
//! Inquiries are the primary series, newsletter subscribers the secondary.

use crate::models::{DenseSeries, Insight, Trend, TrendResult};

const FALLBACK: &str = "📊 Data collection in progress. More insights coming soon.";

/// Emits, in order: the primary trend (when not stable), secondary growth
/// (up only), the primary series' peak day, or the fallback when none apply.
pub fn insights(primary: &TrendResult, secondary: &TrendResult) -> Vec<Insight> {
    let mut out = Vec::new();

    match primary.trend {
        Trend::Up => out.push(format!(
            "📈 Inquiries are trending up by {}%",
            percent_text(primary.change_percent)
        )),
        Trend::Down => out.push(format!(
            "📉 Inquiries have decreased by {}%",
            percent_text(primary.change_percent)
        )),
        Trend::Stable => {}
    }

    if secondary.trend == Trend::Up {
        out.push(format!(
            "🎯 Newsletter growth is strong at {}%",
            percent_text(secondary.change_percent)
        ));
    }

    if let Some(day) = peak_day(&primary.series) {
        out.push(format!("⭐ Peak activity was on {}", day));
    }

    if out.is_empty() {
        out.push(FALLBACK.to_string());
    }

    out.into_iter().map(|text| Insight { text }).collect()
}

/// Absolute change with at least one decimal (`50.0`, `166.67`); a change that
/// could not be computed (empty first half) reads `0`.
fn percent_text(change_percent: f64) -> String {
    let change = change_percent.abs();
    if change == 0.0 {
        "0".to_string()
    } else {
        format!("{:?}", change)
    }
}

/// Label of the first maximum; `None` unless the series has any activity.
fn peak_day(series: &DenseSeries) -> Option<&str> {
    if series.total() <= 0.0 {
        return None;
    }

    series
        .values
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, &v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
        .and_then(|(i, _)| series.labels.get(i))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(values: &[f64], trend: Trend, change_percent: f64) -> TrendResult {
        TrendResult {
            series: DenseSeries {
                labels: (1..=values.len()).map(|d| format!("2024-05-{:02}", d)).collect(),
                values: values.to_vec(),
            },
            trend,
            change_percent,
        }
    }

    fn texts(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn test_full_insight_order() {
        let primary = trend(&[1.0, 4.0, 2.0, 6.0], Trend::Up, 166.67);
        let secondary = trend(&[0.0, 0.0, 1.0, 1.0], Trend::Up, 0.0);

        let out = insights(&primary, &secondary);
        assert_eq!(
            texts(&out),
            vec![
                "📈 Inquiries are trending up by 166.67%",
                "🎯 Newsletter growth is strong at 0%",
                "⭐ Peak activity was on 2024-05-04",
            ]
        );
    }

    #[test]
    fn test_down_trend_reports_absolute_change() {
        let primary = trend(&[10.0, 10.0, 10.0, 5.0, 5.0, 5.0], Trend::Down, -50.0);
        let secondary = trend(&[], Trend::Stable, 0.0);

        let out = insights(&primary, &secondary);
        assert_eq!(out[0].text, "📉 Inquiries have decreased by 50.0%");
        assert_eq!(out[1].text, "⭐ Peak activity was on 2024-05-01");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_percent_text_keeps_a_decimal() {
        assert_eq!(percent_text(-50.0), "50.0");
        assert_eq!(percent_text(166.67), "166.67");
        assert_eq!(percent_text(12.5), "12.5");
        assert_eq!(percent_text(0.0), "0");
    }

    #[test]
    fn test_secondary_decline_is_not_reported() {
        let primary = trend(&[0.0, 0.0], Trend::Stable, 0.0);
        let secondary = trend(&[5.0, 1.0], Trend::Down, -80.0);

        let out = insights(&primary, &secondary);
        assert_eq!(texts(&out), vec![FALLBACK]);
    }

    #[test]
    fn test_peak_tie_takes_first_occurrence() {
        let primary = trend(&[2.0, 7.0, 3.0, 7.0], Trend::Stable, 0.0);
        let secondary = trend(&[], Trend::Stable, 0.0);

        let out = insights(&primary, &secondary);
        assert_eq!(texts(&out), vec!["⭐ Peak activity was on 2024-05-02"]);
    }

    #[test]
    fn test_empty_inputs_fall_back() {
        let empty = trend(&[], Trend::Stable, 0.0);
        let out = insights(&empty, &empty);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), FALLBACK);
    }
}
