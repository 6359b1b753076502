//! Router-level tests. The pool connects lazily and every route exercised here
//! answers before touching the database.

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use quantalyze_backend::app::create_app;
use quantalyze_backend::config::AppConfig;
use quantalyze_backend::state::AppState;

fn test_app() -> Router {
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/quantalyze_test".to_string()),
        _ => None,
    })
    .unwrap();
    let pool = PgPoolOptions::new().connect_lazy(&config.database_url).unwrap();
    create_app(AppState::new(pool, config))
}

async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_capabilities_without_api_key() {
    let (status, body) = get("/api/ai/capabilities").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ai_enabled"], false);
    assert_eq!(json["setup_hint"], "Add OPENAI_API_KEY to enable AI-powered features");
    assert_eq!(json["content_types"], json!(["email", "blog", "social", "response"]));
}

#[tokio::test]
async fn test_generate_content_falls_back_to_template() {
    let (status, json) = post_json(
        "/api/ai/generate-content",
        json!({"prompt": "New website launch", "content_type": "social", "tone": "casual"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "template_generated");
    assert_eq!(json["content"], "✨ New website launch 💪 #Quantalyze #DigitalAgency");
    assert_eq!(json["note"], "Configure OPENAI_API_KEY for AI-generated content");
}

#[tokio::test]
async fn test_generate_content_rejects_empty_prompt() {
    let (status, json) = post_json(
        "/api/ai/generate-content",
        json!({"prompt": "  ", "content_type": "email"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_generate_content_accepts_unlisted_type_and_length() {
    let (status, json) = post_json(
        "/api/ai/generate-content",
        json!({"prompt": "Spring sale", "content_type": "newsletter", "tone": "witty"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "template_generated");
    assert_eq!(json["content"], "Generated content for: Spring sale");

    let (status, json) = post_json(
        "/api/ai/generate-content",
        json!({"prompt": "Spring sale", "content_type": "email", "length": "huge"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "template_generated");
    assert!(json["content"].as_str().unwrap().contains("Spring sale"));
}

#[tokio::test]
async fn test_generate_content_without_prompt_is_json_error() {
    let (status, json) = post_json("/api/ai/generate-content", json!({"content_type": "email"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["detail"].as_str().unwrap().contains("prompt"));
}

#[tokio::test]
async fn test_analyze_keywords() {
    let (status, json) = post_json(
        "/api/ai/analyze",
        json!({"text": "Design sprint. Design review.", "analysis_type": "keywords"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["analysis_type"], "keywords");
    assert_eq!(json["keywords"][0], json!({"word": "design", "count": 2}));
    assert_eq!(json["total_words"], 4);
}

#[tokio::test]
async fn test_analyze_rejects_unknown_type() {
    let (status, json) = post_json(
        "/api/ai/analyze",
        json!({"text": "anything", "analysis_type": "emotion"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Invalid analysis type");
}

#[tokio::test]
async fn test_dashboard_rejects_malformed_period() {
    let (status, _) = get("/api/analytics/dashboard?period=thirty").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/analytics/dashboard?period=0d").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forecast_rejects_out_of_range_horizon() {
    let (status, body) = get("/api/analytics/revenue/forecast?months=25").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["detail"], "months must be between 1 and 24, got 25");
}

#[tokio::test]
async fn test_trends_rejects_zero_days() {
    let (status, _) = get("/api/analytics/trends?days=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_query_values_are_json_errors() {
    for uri in [
        "/api/analytics/trends?days=abc",
        "/api/analytics/revenue/forecast?months=-1",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false, "{}", uri);
        assert!(json["detail"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_overview_rejects_malformed_period() {
    let (status, body) = get("/api/analytics/overview?period=month").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
}
