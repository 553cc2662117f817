use crate::error::{AppError, AppResult};
use crate::services::short_code::ShortCodeService;
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use url::Url as UrlParser;

use super::AppState;

/// First path segments that belong to the UI tooling, never to short codes
const RESERVED_SEGMENTS: &[&str] = &["src", "@vite", "@fs", "node_modules"];

/// Base URL for short links.
///
/// Uses the configured public domain when present, otherwise the scheme and
/// host the request came in on.
pub(crate) fn request_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base_url) = &state.public_base_url {
        return base_url.clone();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

/// Check that a destination is an absolute URL, and http(s) when strict.
///
/// The raw string is later sent as the `Location` header, so it must be a
/// valid header value as written. The URL parser strips tabs, newlines and
/// surrounding whitespace before parsing and would not catch them.
pub(crate) fn validate_original_url(raw: &str, strict: bool) -> AppResult<()> {
    let clean = raw.trim() == raw
        && !raw.chars().any(char::is_control)
        && HeaderValue::from_str(raw).is_ok();
    if !clean {
        return Err(AppError::Validation(
            "URL must not contain control characters or surrounding whitespace".to_string(),
        ));
    }

    let parsed =
        UrlParser::parse(raw).map_err(|_| AppError::Validation("Invalid URL format".to_string()))?;

    if strict && !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

/// Whether a single-segment path is left to the UI instead of the redirect lookup
pub(crate) fn is_reserved_path(segment: &str) -> bool {
    ShortCodeService::is_reserved(segment)
        || segment.contains('.')
        || RESERVED_SEGMENTS.contains(&segment)
}

/// Serve the single-page UI: static files, with `index.html` for unknown paths
pub(crate) async fn serve_spa(static_dir: &Path, req: Request) -> Response {
    let index = static_dir.join("index.html");
    let service = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    match service.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
