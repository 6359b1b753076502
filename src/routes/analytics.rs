use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{
    ConversionMetrics, DashboardResponse, DataStats, EventOverview, InquiryBreakdown, PopularService,
    ReportingPeriod, RevenueEstimate, RevenueForecast, TrafficTrends,
};
use crate::routes::extract::AppQuery;
use crate::services::analytics_service;
use crate::state::AppState;

const DEFAULT_TREND_DAYS: u32 = 90;
const DEFAULT_FORECAST_MONTHS: u32 = 3;
const MAX_FORECAST_MONTHS: u32 = 24;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/overview", get(get_event_overview))
        .route("/trends", get(get_traffic_trends))
        .route("/popular-services", get(get_popular_services))
        .route("/stats", get(get_data_stats))
        .route("/inquiries/breakdown", get(get_inquiry_breakdown))
        .route("/revenue", get(get_revenue_estimate))
        .route("/revenue/forecast", get(get_revenue_forecast))
        .route("/conversion", get(get_conversion_metrics))
}

#[derive(Debug, Deserialize)]
struct PeriodQuery {
    period: Option<String>,
}

impl PeriodQuery {
    fn parse(&self, default: ReportingPeriod) -> Result<ReportingPeriod, AppError> {
        match self.period.as_deref() {
            Some(raw) => raw.parse::<ReportingPeriod>().map_err(AppError::Validation),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrendsQuery {
    days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ForecastQuery {
    months: Option<u32>,
}

/// GET /api/analytics/dashboard?period=30d
async fn get_dashboard(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PeriodQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let period = params.parse(ReportingPeriod::default())?;
    info!("GET /api/analytics/dashboard - period: {}", period);

    analytics_service::dashboard(&state.pool, period, Utc::now().date_naive())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to build dashboard for {}: {}", period, e);
            e
        })
}

/// GET /api/analytics/trends?days=90
async fn get_traffic_trends(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TrendsQuery>,
) -> Result<Json<TrafficTrends>, AppError> {
    let period = ReportingPeriod::from_days(params.days.unwrap_or(DEFAULT_TREND_DAYS))?;
    info!("GET /api/analytics/trends - days: {}", period.days());

    analytics_service::traffic_trends(&state.pool, period, Utc::now().date_naive())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to compute traffic trends: {}", e);
            e
        })
}

/// GET /api/analytics/overview?period=30d
async fn get_event_overview(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PeriodQuery>,
) -> Result<Json<EventOverview>, AppError> {
    let period = params.parse(ReportingPeriod::default())?;
    info!("GET /api/analytics/overview - period: {}", period);

    analytics_service::event_overview(&state.pool, period, Utc::now().date_naive())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to build event overview for {}: {}", period, e);
            e
        })
}

async fn get_popular_services(State(state): State<AppState>) -> Result<Json<Vec<PopularService>>, AppError> {
    info!("GET /api/analytics/popular-services");

    analytics_service::popular_services(&state.pool)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to fetch popular services: {}", e);
            e
        })
}

/// GET /api/analytics/stats
async fn get_data_stats(State(state): State<AppState>) -> Result<Json<DataStats>, AppError> {
    info!("GET /api/analytics/stats");

    analytics_service::data_stats(&state.pool, Utc::now())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to count records: {}", e);
            e
        })
}

async fn get_inquiry_breakdown(State(state): State<AppState>) -> Result<Json<InquiryBreakdown>, AppError> {
    info!("GET /api/analytics/inquiries/breakdown");

    analytics_service::inquiry_breakdown(&state.pool)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to fetch inquiry breakdown: {}", e);
            e
        })
}

/// GET /api/analytics/revenue/forecast?months=3
async fn get_revenue_forecast(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ForecastQuery>,
) -> Result<Json<RevenueForecast>, AppError> {
    let months = params.months.unwrap_or(DEFAULT_FORECAST_MONTHS);
    if !(1..=MAX_FORECAST_MONTHS).contains(&months) {
        return Err(AppError::Validation(format!(
            "months must be between 1 and {}, got {}",
            MAX_FORECAST_MONTHS, months
        )));
    }
    info!("GET /api/analytics/revenue/forecast - months: {}", months);

    analytics_service::revenue_forecast(&state.pool, &state.config.revenue, months, Utc::now().date_naive())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to forecast revenue: {}", e);
            e
        })
}

/// GET /api/analytics/revenue?period=365d
async fn get_revenue_estimate(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PeriodQuery>,
) -> Result<Json<RevenueEstimate>, AppError> {
    let period = params.parse(ReportingPeriod::from_days(365)?)?;
    info!("GET /api/analytics/revenue - period: {}", period);

    analytics_service::revenue_estimate(&state.pool, &state.config.revenue, period, Utc::now().date_naive())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to estimate revenue for {}: {}", period, e);
            e
        })
}

async fn get_conversion_metrics(State(state): State<AppState>) -> Result<Json<ConversionMetrics>, AppError> {
    info!("GET /api/analytics/conversion");

    analytics_service::conversion_metrics(&state.pool)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to compute conversion metrics: {}", e);
            e
        })
}
