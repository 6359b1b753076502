use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::models::{CategoryCount, MonthlyCount, PopularService, RawObservation, RecordCounts, ServiceMonthCount};

#[derive(Debug, Clone, FromRow)]
pub struct DailyCountRow {
    pub date: NaiveDate,
    pub count: i64,
    pub category: Option<String>,
}

impl From<DailyCountRow> for RawObservation {
    fn from(row: DailyCountRow) -> Self {
        RawObservation {
            date: row.date,
            count: row.count.max(0) as u64,
            category: row.category,
        }
    }
}

fn into_observations(rows: Vec<DailyCountRow>) -> Vec<RawObservation> {
    rows.into_iter().map(RawObservation::from).collect()
}

/// Inquiries per day and status between `start` and `end` inclusive.
pub async fn fetch_daily_inquiries(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RawObservation>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DailyCountRow>(
        r#"
        SELECT
          created_at::date AS date,
          COUNT(*) AS count,
          status AS category
        FROM inquiries
        WHERE created_at::date BETWEEN $1 AND $2
        GROUP BY created_at::date, status
        ORDER BY date ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(into_observations(rows))
}

pub async fn fetch_daily_subscribers(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RawObservation>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DailyCountRow>(
        r#"
        SELECT
          created_at::date AS date,
          COUNT(*) AS count,
          NULL::text AS category
        FROM newsletter_subscribers
        WHERE created_at::date BETWEEN $1 AND $2
        GROUP BY created_at::date
        ORDER BY date ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(into_observations(rows))
}

/// Tracked site events per day, grouped by event type.
pub async fn fetch_daily_events(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RawObservation>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DailyCountRow>(
        r#"
        SELECT
          created_at::date AS date,
          COUNT(*) AS count,
          event_type AS category
        FROM analytics_events
        WHERE created_at::date BETWEEN $1 AND $2
        GROUP BY created_at::date, event_type
        ORDER BY date ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(into_observations(rows))
}

/// Distinct sessions per day.
pub async fn fetch_daily_sessions(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RawObservation>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DailyCountRow>(
        r#"
        SELECT
          created_at::date AS date,
          COUNT(DISTINCT session_id) AS count,
          NULL::text AS category
        FROM analytics_events
        WHERE created_at::date BETWEEN $1 AND $2
        GROUP BY created_at::date
        ORDER BY date ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(into_observations(rows))
}

#[derive(Debug, Clone, FromRow)]
pub struct EventTotalsRow {
    pub total_events: i64,
    pub unique_sessions: i64,
}

pub async fn fetch_event_totals(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<EventTotalsRow, sqlx::Error> {
    sqlx::query_as::<_, EventTotalsRow>(
        r#"
        SELECT
          COUNT(*) AS total_events,
          COUNT(DISTINCT session_id) AS unique_sessions
        FROM analytics_events
        WHERE created_at::date BETWEEN $1 AND $2
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
}

pub async fn fetch_event_breakdown(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CategoryCount>, sqlx::Error> {
    sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT
          event_type AS label,
          COUNT(*) AS count
        FROM analytics_events
        WHERE created_at::date BETWEEN $1 AND $2
        GROUP BY event_type
        ORDER BY count DESC, label ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

pub async fn count_active_subscribers(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM newsletter_subscribers WHERE status = $1")
        .bind("active")
        .fetch_one(pool)
        .await
}

pub async fn count_inquiries_with_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM inquiries WHERE status = $1")
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn count_converted_inquiries(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM inquiries
        WHERE status = 'converted'
          AND created_at::date BETWEEN $1 AND $2
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
}

/// Inquiries per calendar month (`YYYY-MM`) since `since`, oldest first.
pub async fn fetch_monthly_inquiries(
    pool: &PgPool,
    since: NaiveDate,
) -> Result<Vec<MonthlyCount>, sqlx::Error> {
    sqlx::query_as::<_, MonthlyCount>(
        r#"
        SELECT
          to_char(date_trunc('month', created_at), 'YYYY-MM') AS month,
          COUNT(*) AS count
        FROM inquiries
        WHERE created_at::date >= $1
        GROUP BY 1
        ORDER BY 1 ASC
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await
}

pub async fn fetch_monthly_inquiries_by_service(
    pool: &PgPool,
    since: NaiveDate,
) -> Result<Vec<ServiceMonthCount>, sqlx::Error> {
    sqlx::query_as::<_, ServiceMonthCount>(
        r#"
        SELECT
          to_char(date_trunc('month', created_at), 'YYYY-MM') AS month,
          service,
          COUNT(*) AS count
        FROM inquiries
        WHERE created_at::date >= $1
        GROUP BY 1, service
        ORDER BY 1 ASC
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await
}

pub async fn fetch_inquiries_by_service(pool: &PgPool) -> Result<Vec<CategoryCount>, sqlx::Error> {
    sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT
          COALESCE(service, 'unspecified') AS label,
          COUNT(*) AS count
        FROM inquiries
        GROUP BY 1
        ORDER BY count DESC, label ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_inquiries_by_status(pool: &PgPool) -> Result<Vec<CategoryCount>, sqlx::Error> {
    sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT
          status AS label,
          COUNT(*) AS count
        FROM inquiries
        GROUP BY status
        ORDER BY status ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Services named on the most inquiries; inquiries without a service are skipped.
pub async fn fetch_popular_services(pool: &PgPool, limit: i64) -> Result<Vec<PopularService>, sqlx::Error> {
    sqlx::query_as::<_, PopularService>(
        r#"
        SELECT
          service,
          COUNT(*) AS inquiries
        FROM inquiries
        WHERE service IS NOT NULL
        GROUP BY service
        ORDER BY inquiries DESC, service ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn fetch_record_counts(pool: &PgPool) -> Result<RecordCounts, sqlx::Error> {
    sqlx::query_as::<_, RecordCounts>(
        r#"
        SELECT
          (SELECT COUNT(*) FROM inquiries) AS inquiries,
          (SELECT COUNT(*) FROM newsletter_subscribers) AS subscribers,
          (SELECT COUNT(*) FROM team_members) AS team_members,
          (SELECT COUNT(*) FROM services) AS services
        "#,
    )
    .fetch_one(pool)
    .await
}

#[derive(Debug, Clone, FromRow)]
pub struct ConversionTotalsRow {
    pub total_visitors: i64,
    pub total_contacts: i64,
    pub total_subscribers: i64,
}

pub async fn fetch_conversion_totals(pool: &PgPool) -> Result<ConversionTotalsRow, sqlx::Error> {
    sqlx::query_as::<_, ConversionTotalsRow>(
        r#"
        SELECT
          (SELECT COUNT(DISTINCT session_id) FROM analytics_events) AS total_visitors,
          (SELECT COUNT(*) FROM inquiries) AS total_contacts,
          (SELECT COUNT(*) FROM newsletter_subscribers WHERE status = 'active') AS total_subscribers
        "#,
    )
    .fetch_one(pool)
    .await
}
