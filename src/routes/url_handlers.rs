use crate::error::{AppError, AppResult, ErrorBody};
use crate::models::{
    CreateUrlRequest, CreateUrlResponse, DeleteUrlResponse, ExpiryToken, NewUrl, RecentClick,
    UrlListItem, UrlStatsResponse,
};
use crate::services::short_code::{ShortCodeService, RESERVED_PREFIX};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::helpers::{request_base_url, validate_original_url};
use super::AppState;

/// Number of clicks listed by the stats endpoint
const RECENT_CLICKS_LIMIT: usize = 10;

/// Create a short URL
#[utoipa::path(
    post,
    path = "/api/shorturl",
    tag = "urls",
    request_body = CreateUrlRequest,
    responses(
        (status = 201, description = "Short URL created", body = CreateUrlResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Short code already taken", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn create_url(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation failed: {}", e)))?;

    validate_original_url(&payload.original_url, state.strict_url_validation)?;

    if let Some(code) = &payload.code {
        if !ShortCodeService::is_valid(code) {
            return Err(AppError::Validation(
                "Code must be 5-10 alphanumeric characters".to_string(),
            ));
        }
        if ShortCodeService::is_reserved(code) {
            return Err(AppError::Validation(format!(
                "Code must not start with \"{}\"",
                RESERVED_PREFIX
            )));
        }
    }

    let expires_in = match payload.expires_at.as_deref() {
        Some(token) => token.parse::<ExpiryToken>()?,
        None => state.default_expiry,
    };

    let url = state
        .storage
        .create_url(NewUrl {
            original_url: payload.original_url,
            code: payload.code,
            expires_in,
        })
        .await?;

    info!(code = %url.code, expires_in = %expires_in, "Created short URL");

    let short_url = format!("{}/{}", request_base_url(&state, &headers), url.code);

    let response = CreateUrlResponse {
        original_url: url.original_url,
        short_url,
        code: url.code,
        created_at: url.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all active short URLs, newest first
#[utoipa::path(
    get,
    path = "/api/shorturl",
    tag = "urls",
    responses(
        (status = 200, description = "Active short URLs", body = Vec<UrlListItem>),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn list_urls(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let urls = state.storage.get_all_urls().await?;
    let base_url = request_base_url(&state, &headers);

    let items: Vec<UrlListItem> = urls
        .into_iter()
        .map(|url| UrlListItem::new(url, &base_url))
        .collect();

    Ok(Json(items))
}

/// Get click statistics for a short URL
#[utoipa::path(
    get,
    path = "/api/shorturl/{code}/stats",
    tag = "urls",
    params(("code" = String, Path, description = "Short code")),
    responses(
        (status = 200, description = "Statistics for the short URL", body = UrlStatsResponse),
        (status = 404, description = "Unknown or expired code", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn get_url_stats(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let url = state
        .storage
        .get_url_by_code(&code)
        .await?
        .ok_or(AppError::UrlNotFound(code))?;

    let recent_clicks = state
        .storage
        .get_clicks_by_url_id(url.id)
        .await?
        .into_iter()
        .take(RECENT_CLICKS_LIMIT)
        .map(|click| RecentClick {
            timestamp: click.timestamp,
        })
        .collect();

    Ok(Json(UrlStatsResponse {
        code: url.code,
        original_url: url.original_url,
        total_clicks: url.clicks,
        created_at: url.created_at,
        expires_at: url.expires_at,
        recent_clicks,
    }))
}

/// Delete a short URL and its recorded clicks
#[utoipa::path(
    delete,
    path = "/api/shorturl/{code}",
    tag = "urls",
    params(("code" = String, Path, description = "Short code")),
    responses(
        (status = 200, description = "Short URL deleted", body = DeleteUrlResponse),
        (status = 404, description = "Unknown or expired code", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn delete_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.storage.delete_url(&code).await?;

    if !deleted {
        return Err(AppError::UrlNotFound(code));
    }

    info!(code = %code, "Deleted short URL");

    Ok(Json(DeleteUrlResponse {
        message: "URL deleted successfully".to_string(),
        code,
    }))
}
