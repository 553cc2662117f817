use crate::error::{AppError, AppResult};
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{debug, info};

use super::helpers::{is_reserved_path, serve_spa};
use super::AppState;

/// Redirect a short code to its destination.
///
/// Reserved paths, unknown codes and expired codes are handed to the UI
/// instead of producing an API error.
#[utoipa::path(
    get,
    path = "/{code}",
    tag = "redirect",
    params(("code" = String, Path, description = "Short code")),
    responses(
        (status = 302, description = "Redirect to the original URL"),
        (status = 200, description = "Unknown code, the UI is served instead"),
        (status = 500, description = "Stored destination cannot be sent as a header")
    )
)]
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    req: Request,
) -> AppResult<Response> {
    if is_reserved_path(&code) {
        return Ok(serve_spa(&state.static_dir, req).await);
    }

    let Some(url) = state.storage.get_url_by_code(&code).await? else {
        debug!(code = %code, "No active short URL, serving UI");
        return Ok(serve_spa(&state.static_dir, req).await);
    };

    // Nothing is counted unless the redirect can actually be sent
    let location = HeaderValue::from_str(&url.original_url).map_err(|e| {
        AppError::Internal(format!("Invalid destination stored for {}: {}", code, e))
    })?;

    state.storage.increment_clicks(&code).await?;
    state.storage.record_click(url.id).await?;

    info!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Everything no route matched goes to the UI
pub async fn spa_fallback(State(state): State<Arc<AppState>>, req: Request) -> Response {
    serve_spa(&state.static_dir, req).await
}
