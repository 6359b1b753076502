use axum::Router;
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::routes::{ai, analytics, health};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/analytics", analytics::router())
        .nest("/api/ai", ai::router())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
