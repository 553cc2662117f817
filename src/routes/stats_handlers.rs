use crate::error::{AppResult, ErrorBody};
use crate::models::StatsResponse;
use crate::util::format_click_rate;
use axum::extract::State;
use axum::response::{IntoResponse, Json};
use std::sync::Arc;

use super::AppState;

/// Get global statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Totals across all short URLs", body = StatsResponse),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    // Counts every stored row, expired ones included
    let total_urls = state.storage.total_urls().await?;
    let total_clicks = state.storage.total_clicks().await?;
    let active_urls = state.storage.active_urls().await?;

    Ok(Json(StatsResponse {
        total_urls,
        total_clicks,
        active_urls,
        avg_click_rate: format_click_rate(total_clicks, total_urls),
    }))
}
