use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Minimum number of monthly periods required before projecting forward.
pub const MIN_FORECAST_HISTORY: usize = 3;

/// Single projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period_label: String,
    pub projected_count: u64,
    pub projected_revenue: f64,
}

/// Advisory label; it is not a statistical interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastConfidence {
    Low,
    Medium,
}

impl ForecastConfidence {
    pub fn for_history_len(len: usize) -> Self {
        if len >= 6 {
            ForecastConfidence::Medium
        } else {
            ForecastConfidence::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Projected {
        points: Vec<ForecastPoint>,
        confidence: ForecastConfidence,
    },
    InsufficientData {
        required: usize,
        available: usize,
        message: String,
    },
}

impl ForecastOutcome {
    pub fn insufficient(available: usize) -> Self {
        ForecastOutcome::InsufficientData {
            required: MIN_FORECAST_HISTORY,
            available,
            message: "Insufficient data for forecasting".to_string(),
        }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        match self {
            ForecastOutcome::Projected { points, .. } => points,
            ForecastOutcome::InsufficientData { .. } => &[],
        }
    }
}

/// Monthly count as returned by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueForecast {
    pub historical: Vec<MonthlyCount>,
    pub forecast: ForecastOutcome,
}

/// Monthly count split by service, feeding the revenue estimate.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ServiceMonthCount {
    pub month: String,
    pub service: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub estimated_revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueEstimate {
    pub total_estimated: f64,
    pub avg_monthly: f64,
    pub months: Vec<MonthlyRevenue>,
}

/// Per-service revenue assumptions used to turn inquiry counts into money.
///
/// `conversion_factor` is the assumed share of inquiries that become paid
/// engagements; it is a business assumption, not something measured.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueModel {
    pub rates: HashMap<String, f64>,
    pub default_rate: f64,
    pub conversion_factor: f64,
}

impl RevenueModel {
    pub fn rate_for(&self, service: Option<&str>) -> f64 {
        service
            .and_then(|s| self.rates.get(s))
            .copied()
            .unwrap_or(self.default_rate)
    }
}

impl Default for RevenueModel {
    fn default() -> Self {
        let rates = [
            ("web-development", 5000.0),
            ("mobile-app", 8000.0),
            ("seo", 1500.0),
            ("digital-marketing", 2000.0),
            ("branding", 3000.0),
        ]
        .into_iter()
        .map(|(service, rate)| (service.to_string(), rate))
        .collect();

        Self {
            rates,
            default_rate: 850.0,
            conversion_factor: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_lookup_falls_back_to_default() {
        let model = RevenueModel::default();
        assert_eq!(model.rate_for(Some("seo")), 1500.0);
        assert_eq!(model.rate_for(Some("unknown")), 850.0);
        assert_eq!(model.rate_for(None), 850.0);
    }

    #[test]
    fn test_confidence_threshold() {
        assert_eq!(ForecastConfidence::for_history_len(3), ForecastConfidence::Low);
        assert_eq!(ForecastConfidence::for_history_len(5), ForecastConfidence::Low);
        assert_eq!(ForecastConfidence::for_history_len(6), ForecastConfidence::Medium);
    }

    #[test]
    fn test_insufficient_outcome_serializes_with_status() {
        let json = serde_json::to_value(ForecastOutcome::insufficient(2)).unwrap();
        assert_eq!(json["status"], "insufficient_data");
        assert_eq!(json["available"], 2);
        assert!(ForecastOutcome::insufficient(2).points().is_empty());
    }
}
