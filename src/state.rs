use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::llm_service::LlmService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub llm: Arc<LlmService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let llm = Arc::new(LlmService::new(&config.llm));
        Self {
            pool,
            config: Arc::new(config),
            llm,
        }
    }
}
