pub mod articles;
pub mod bookmarks;
pub mod claps;
pub mod follows;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::state::AppState;

/// 构建应用路由 - 使用/api/blog/前缀避免网关路由冲突
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .nest(
            "/api/blog/articles",
            articles::router().merge(claps::router()),
        )
        .nest("/api/blog/bookmarks", bookmarks::router())
        .nest("/api/blog/follows", follows::router())
        .layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &str) -> CorsLayer {
    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(origins)
}

async fn health_check() -> &'static str {
    "Rainbow-Blog engagement service is running!"
}
