//! OpenAPI description of the HTTP API.

use crate::error::ErrorBody;
use crate::models::{
    CreateUrlRequest, CreateUrlResponse, DeleteUrlResponse, RecentClick, StatsResponse,
    UrlListItem, UrlStatsResponse,
};
use crate::routes::types::{HealthCheckResponse, HealthStatus};
use crate::routes::{health, redirect, stats_handlers, url_handlers};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "snaplink",
        description = "Shorten URLs, redirect visitors and read click analytics"
    ),
    paths(
        url_handlers::create_url,
        url_handlers::list_urls,
        url_handlers::get_url_stats,
        url_handlers::delete_url,
        stats_handlers::get_stats,
        health::health_check,
        redirect::redirect,
    ),
    components(schemas(
        CreateUrlRequest,
        CreateUrlResponse,
        UrlListItem,
        UrlStatsResponse,
        RecentClick,
        DeleteUrlResponse,
        StatsResponse,
        ErrorBody,
        HealthCheckResponse,
        HealthStatus,
    )),
    tags(
        (name = "urls", description = "Create, list, inspect and delete short URLs"),
        (name = "stats", description = "Aggregate statistics"),
        (name = "redirect", description = "Short link resolution"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Render the OpenAPI document as pretty-printed JSON
pub fn render() -> crate::error::AppResult<String> {
    Ok(serde_json::to_string_pretty(&ApiDoc::openapi())?)
}
