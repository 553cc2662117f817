use crate::config::CorsConfig;
use crate::middleware::request_id_middleware;
use crate::openapi;
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::redirect;
use super::stats_handlers;
use super::url_handlers;
use super::AppState;

/// Create application router
pub fn create_router(
    state: Arc<AppState>,
    cors_config: &CorsConfig,
    max_body_bytes: usize,
) -> axum::Router {
    // Configure CORS with specific origins
    let cors = if cors_config.allows_any() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse::<http::HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = axum::Router::new()
        .route(
            "/api/shorturl",
            get(url_handlers::list_urls).post(url_handlers::create_url),
        )
        .route(
            "/api/shorturl/{code}",
            axum::routing::delete(url_handlers::delete_url),
        )
        .route("/api/shorturl/{code}/stats", get(url_handlers::get_url_stats))
        .route("/api/stats", get(stats_handlers::get_stats))
        .route("/api/health", get(health::health_check))
        .route("/api/openapi.json", get(openapi::openapi_json));

    // Registered after the API routes; static segments win over `{code}`
    let redirect_routes = axum::Router::new().route("/{code}", get(redirect::redirect));

    api_routes
        .merge(redirect_routes)
        .fallback(redirect::spa_fallback)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
