use chrono::{DateTime, Months, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::db;
use crate::errors::AppError;
use crate::models::{
    ConversionMetrics, DashboardMetrics, DashboardResponse, DataStats, EventOverview, InquiryBreakdown,
    PopularService, RawObservation, ReportingPeriod, RevenueEstimate, RevenueForecast, RevenueModel,
    SmoothedSeries, TrafficTrendData, TrafficTrends,
};
use crate::services::indicators::{round2, smooth};
use crate::services::{forecasting_service, insights, series, trend};

const FORECAST_HISTORY_MONTHS: u32 = 12;
const POPULAR_SERVICES_LIMIT: i64 = 10;
const PENDING_INQUIRY_STATUS: &str = "new";

pub async fn dashboard(pool: &PgPool, period: ReportingPeriod, today: NaiveDate) -> Result<DashboardResponse, AppError> {
    let (start, end) = period.range_ending(today);

    let inquiry_rows = db::analytics_queries::fetch_daily_inquiries(pool, start, end).await?;
    let subscriber_rows = db::analytics_queries::fetch_daily_subscribers(pool, start, end).await?;
    let converted = db::analytics_queries::count_converted_inquiries(pool, start, end).await?;

    Ok(build_dashboard(&inquiry_rows, &subscriber_rows, converted, period, today))
}

/// Inquiries are the primary series and subscribers the secondary one.
///
/// The range covers `period.days() + 1` calendar days, while the daily
/// average divides by `period.days()`.
pub fn build_dashboard(
    inquiry_rows: &[RawObservation],
    subscriber_rows: &[RawObservation],
    converted: i64,
    period: ReportingPeriod,
    today: NaiveDate,
) -> DashboardResponse {
    let (start, end) = period.range_ending(today);

    let inquiries = trend::classify(series::fill(inquiry_rows, start, end));
    let subscribers = trend::classify(series::fill(subscriber_rows, start, end));

    let total_inquiries = inquiries.series.total() as u64;
    let metrics = DashboardMetrics {
        total_inquiries,
        conversion_rate: conversion_rate(converted.max(0) as u64, total_inquiries),
        avg_daily_inquiries: avg_daily(total_inquiries, period.days()),
        growth_rate: trend::growth_rate(&inquiries.series.values),
    };

    let insights = insights::insights(&inquiries, &subscribers);

    DashboardResponse {
        period: period.to_string(),
        inquiries,
        subscribers,
        metrics,
        insights,
    }
}

pub async fn traffic_trends(pool: &PgPool, period: ReportingPeriod, today: NaiveDate) -> Result<TrafficTrends, AppError> {
    let (start, end) = period.range_ending(today);
    let event_rows = db::analytics_queries::fetch_daily_events(pool, start, end).await?;
    if event_rows.is_empty() {
        debug!("No analytics events between {} and {}", start, end);
        return Ok(TrafficTrends::InsufficientData);
    }
    let session_rows = db::analytics_queries::fetch_daily_sessions(pool, start, end).await?;

    Ok(build_traffic_trends(&event_rows, &session_rows, period, today))
}

/// Daily events with 7/30-day averages and week-over-week momentum.
/// No events in the range at all gives `InsufficientData`.
pub fn build_traffic_trends(
    event_rows: &[RawObservation],
    session_rows: &[RawObservation],
    period: ReportingPeriod,
    today: NaiveDate,
) -> TrafficTrends {
    let (start, end) = period.range_ending(today);
    let dense = series::fill(event_rows, start, end);

    if dense.total() <= 0.0 {
        return TrafficTrends::InsufficientData;
    }
    let Some(momentum) = trend::momentum(&dense.values) else {
        return TrafficTrends::InsufficientData;
    };

    let data = SmoothedSeries {
        ma_7: smooth(&dense, 7),
        ma_30: smooth(&dense, 30),
        unique_sessions: series::fill(session_rows, start, end).values,
        series: dense,
    };

    TrafficTrends::Available(TrafficTrendData { momentum, data })
}

pub async fn event_overview(pool: &PgPool, period: ReportingPeriod, today: NaiveDate) -> Result<EventOverview, AppError> {
    let (start, end) = period.range_ending(today);

    let totals = db::analytics_queries::fetch_event_totals(pool, start, end).await?;
    let event_breakdown = db::analytics_queries::fetch_event_breakdown(pool, start, end).await?;
    let newsletter_subscribers = db::analytics_queries::count_active_subscribers(pool).await?;
    let pending_inquiries =
        db::analytics_queries::count_inquiries_with_status(pool, PENDING_INQUIRY_STATUS).await?;

    Ok(EventOverview {
        period: period.to_string(),
        total_events: totals.total_events,
        unique_sessions: totals.unique_sessions,
        event_breakdown,
        newsletter_subscribers,
        pending_inquiries,
    })
}

pub async fn popular_services(pool: &PgPool) -> Result<Vec<PopularService>, AppError> {
    Ok(db::analytics_queries::fetch_popular_services(pool, POPULAR_SERVICES_LIMIT).await?)
}

pub async fn data_stats(pool: &PgPool, now: DateTime<Utc>) -> Result<DataStats, AppError> {
    let stats = db::analytics_queries::fetch_record_counts(pool).await?;
    Ok(DataStats { stats, last_updated: now })
}

pub async fn inquiry_breakdown(pool: &PgPool) -> Result<InquiryBreakdown, AppError> {
    let by_service = db::analytics_queries::fetch_inquiries_by_service(pool).await?;
    let by_status = db::analytics_queries::fetch_inquiries_by_status(pool).await?;

    Ok(InquiryBreakdown { by_service, by_status })
}

/// Twelve months of history projected `months_ahead` months past `today`.
pub async fn revenue_forecast(
    pool: &PgPool,
    model: &RevenueModel,
    months_ahead: u32,
    today: NaiveDate,
) -> Result<RevenueForecast, AppError> {
    let since = today
        .checked_sub_months(Months::new(FORECAST_HISTORY_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    let historical = db::analytics_queries::fetch_monthly_inquiries(pool, since).await?;

    let forecast = forecasting_service::forecast(&historical, months_ahead, today, model);

    Ok(RevenueForecast { historical, forecast })
}

pub async fn revenue_estimate(
    pool: &PgPool,
    model: &RevenueModel,
    period: ReportingPeriod,
    today: NaiveDate,
) -> Result<RevenueEstimate, AppError> {
    let (since, _) = period.range_ending(today);
    let rows = db::analytics_queries::fetch_monthly_inquiries_by_service(pool, since).await?;

    Ok(forecasting_service::estimate_revenue(&rows, model))
}

pub async fn conversion_metrics(pool: &PgPool) -> Result<ConversionMetrics, AppError> {
    let totals = db::analytics_queries::fetch_conversion_totals(pool).await?;

    Ok(compute_conversion(
        totals.total_visitors,
        totals.total_contacts,
        totals.total_subscribers,
    ))
}

/// Contact and subscription rates as percentages of visitors (at least one visitor assumed).
pub fn compute_conversion(visitors: i64, contacts: i64, subscribers: i64) -> ConversionMetrics {
    let denominator = visitors.max(1) as f64;

    ConversionMetrics {
        total_visitors: visitors,
        total_contacts: contacts,
        total_subscribers: subscribers,
        contact_conversion_rate: round2(contacts as f64 / denominator * 100.0),
        subscription_conversion_rate: round2(subscribers as f64 / denominator * 100.0),
    }
}

pub fn conversion_rate(converted: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(converted as f64 / total as f64 * 100.0)
}

pub fn avg_daily(total: u64, days: u32) -> f64 {
    round2(total as f64 / f64::from(days.max(1)))
}
