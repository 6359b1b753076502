use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One aggregated row from the query layer: how many records fell on `date`,
/// optionally split by a grouping key such as inquiry status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub count: u64,
    pub category: Option<String>,
}

impl RawObservation {
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count, category: None }
    }

    pub fn with_category(date: NaiveDate, count: u64, category: impl Into<String>) -> Self {
        Self { date, count, category: Some(category.into()) }
    }
}

/// One value per calendar day, zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenseSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl DenseSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    #[serde(flatten)]
    pub series: DenseSeries,
    pub trend: Trend,
    pub change_percent: f64,
}

/// Week-over-week direction of daily traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumResult {
    pub direction: Momentum,
    pub growth_rate: f64,
    pub recent_avg: f64,
    pub previous_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A look-back window written as `<days>d`, e.g. `30d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    days: u32,
}

impl ReportingPeriod {
    pub const MAX_DAYS: u32 = 3650;

    pub fn from_days(days: u32) -> Result<Self, String> {
        if days == 0 || days > Self::MAX_DAYS {
            return Err(format!("Period must be between 1 and {} days, got {}", Self::MAX_DAYS, days));
        }
        Ok(Self { days })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Inclusive `[end - days, end]` range.
    pub fn range_ending(&self, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = end - chrono::Duration::days(i64::from(self.days));
        (start, end)
    }
}

impl Default for ReportingPeriod {
    fn default() -> Self {
        Self { days: 30 }
    }
}

impl FromStr for ReportingPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days = s
            .trim()
            .strip_suffix('d')
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| format!("Invalid period '{}': expected a value like 7d, 30d, 90d or 365d", s))?;
        Self::from_days(days)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_inquiries: u64,
    pub conversion_rate: f64,
    pub avg_daily_inquiries: f64,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub period: String,
    pub inquiries: TrendResult,
    pub subscribers: TrendResult,
    pub metrics: DashboardMetrics,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothedSeries {
    #[serde(flatten)]
    pub series: DenseSeries,
    pub ma_7: Vec<f64>,
    pub ma_30: Vec<f64>,
    /// Distinct sessions per day, aligned with `series.labels`.
    pub unique_sessions: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficTrendData {
    #[serde(flatten)]
    pub momentum: MomentumResult,
    pub data: SmoothedSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrafficTrends {
    Available(TrafficTrendData),
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryBreakdown {
    pub by_service: Vec<CategoryCount>,
    pub by_status: Vec<CategoryCount>,
}

/// Site activity over a reporting period plus current subscriber and lead backlog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOverview {
    pub period: String,
    pub total_events: i64,
    pub unique_sessions: i64,
    /// Events per type, most frequent first.
    pub event_breakdown: Vec<CategoryCount>,
    pub newsletter_subscribers: i64,
    pub pending_inquiries: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PopularService {
    pub service: String,
    pub inquiries: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecordCounts {
    pub inquiries: i64,
    pub subscribers: i64,
    pub team_members: i64,
    pub services: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStats {
    pub stats: RecordCounts,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetrics {
    pub total_visitors: i64,
    pub total_contacts: i64,
    pub total_subscribers: i64,
    pub contact_conversion_rate: f64,
    pub subscription_conversion_rate: f64,
}
