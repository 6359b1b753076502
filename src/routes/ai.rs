use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{
    AnalysisRequest, AnalysisType, Capabilities, ContentRequest, GeneratedContent, InquiryResponseDraft,
    InquiryResponseRequest, TextAnalysis,
};
use crate::routes::extract::AppJson;
use crate::services::{assistant_service, text_analysis};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-content", post(generate_content))
        .route("/analyze", post(analyze_text))
        .route("/inquiries/:inquiry_id/response", post(draft_inquiry_response))
        .route("/capabilities", get(get_capabilities))
}

/// POST /api/ai/generate-content
/// Falls back to templates when no model is configured or the call fails.
async fn generate_content(
    State(state): State<AppState>,
    AppJson(request): AppJson<ContentRequest>,
) -> Result<Json<GeneratedContent>, AppError> {
    info!(
        "POST /api/ai/generate-content - type: {:?}, tone: {:?}, length: {:?}",
        request.content_type, request.tone, request.length
    );

    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }

    Ok(Json(state.llm.generate_content(&request).await))
}

/// POST /api/ai/analyze
async fn analyze_text(AppJson(request): AppJson<AnalysisRequest>) -> Result<Json<TextAnalysis>, AppError> {
    info!("POST /api/ai/analyze - type: {}", request.analysis_type);

    let analysis_type = request.analysis_type.parse::<AnalysisType>()?;

    Ok(Json(text_analysis::analyze(&request.text, analysis_type)))
}

/// POST /api/ai/inquiries/:inquiry_id/response
async fn draft_inquiry_response(
    State(state): State<AppState>,
    Path(inquiry_id): Path<i64>,
    body: Option<Json<InquiryResponseRequest>>,
) -> Result<Json<InquiryResponseDraft>, AppError> {
    info!("POST /api/ai/inquiries/{}/response", inquiry_id);

    let request = body.map(|Json(r)| r).unwrap_or_default();

    assistant_service::draft_inquiry_response(
        &state.pool,
        &state.llm,
        inquiry_id,
        request.custom_context.as_deref(),
    )
    .await
    .map(Json)
    .map_err(|e| {
        error!("Failed to draft response for inquiry {}: {}", inquiry_id, e);
        e
    })
}

async fn get_capabilities(State(state): State<AppState>) -> Json<Capabilities> {
    info!("GET /api/ai/capabilities");
    Json(assistant_service::capabilities(state.llm.is_enabled()))
}
