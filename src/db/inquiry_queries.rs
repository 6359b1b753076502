use sqlx::PgPool;

use crate::models::Inquiry;

pub async fn fetch_one(pool: &PgPool, id: i64) -> Result<Option<Inquiry>, sqlx::Error> {
    sqlx::query_as::<_, Inquiry>(
        "SELECT id, name, email, service, message, status, created_at
         FROM inquiries
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
