use sqlx::PgPool;

use crate::db;
use crate::errors::AppError;
use crate::models::{
    AnalysisType, Capabilities, ContentLength, ContentRequest, ContentType, Inquiry, InquiryResponseDraft, Tone,
};
use crate::services::llm_service::LlmService;

/// Drafts a reply to a stored inquiry. `AppError::NotFound` if the id is unknown.
pub async fn draft_inquiry_response(
    pool: &PgPool,
    llm: &LlmService,
    inquiry_id: i64,
    custom_context: Option<&str>,
) -> Result<InquiryResponseDraft, AppError> {
    let inquiry = db::inquiry_queries::fetch_one(pool, inquiry_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let request = inquiry_content_request(&inquiry, custom_context);
    let generated = llm.generate_content(&request).await;

    Ok(InquiryResponseDraft {
        inquiry_id: inquiry.id,
        name: inquiry.name,
        service: inquiry.service,
        suggested_response: generated.content().to_string(),
        model: generated.model().to_string(),
    })
}

pub fn inquiry_content_request(inquiry: &Inquiry, custom_context: Option<&str>) -> ContentRequest {
    let mut prompt = format!(
        "Customer {} is interested in {}. Their message: {}",
        inquiry.name,
        inquiry.service.as_deref().unwrap_or("our services"),
        inquiry.message.as_deref().unwrap_or("(no message)")
    );
    if let Some(context) = custom_context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(" Additional context: ");
        prompt.push_str(context);
    }

    ContentRequest {
        prompt,
        content_type: ContentType::Response,
        tone: Tone::Professional,
        length: ContentLength::Medium,
    }
}

pub fn capabilities(ai_enabled: bool) -> Capabilities {
    Capabilities {
        ai_enabled,
        content_types: vec![ContentType::Email, ContentType::Blog, ContentType::Social, ContentType::Response],
        tones: vec![Tone::Professional, Tone::Casual, Tone::Friendly],
        analysis_types: vec![AnalysisType::Sentiment, AnalysisType::Keywords, AnalysisType::Summary],
        setup_hint: (!ai_enabled).then(|| "Add OPENAI_API_KEY to enable AI-powered features".to_string()),
    }
}
