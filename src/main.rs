use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use quantalyze_backend::app;
use quantalyze_backend::config::AppConfig;
use quantalyze_backend::logging::{self, LoggingConfig};
use quantalyze_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    let addr = config.bind_addr;
    let state = AppState::new(pool, config);
    let app = app::create_app(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Quantalyze analytics backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
