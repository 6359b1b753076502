use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A lead submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub service: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InquiryResponseRequest {
    pub custom_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InquiryResponseDraft {
    pub inquiry_id: i64,
    pub name: String,
    pub service: Option<String>,
    pub suggested_response: String,
    pub model: String,
}
