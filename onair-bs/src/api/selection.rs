//! Render-time selection endpoint

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::{banners, schedule};
use crate::selection::select_banner;
use crate::{ApiError, ApiResult, AppState};
use onair_common::models::Banner;
use onair_common::time;

/// GET /api/select/:slot_key
///
/// Reads a fresh snapshot of catalog and schedule, then runs the pure
/// selection over it. Responds 200 with the banner, or 200 `null` when
/// neither a scheduled entry nor a pilot qualifies; an empty slot is a
/// normal outcome, not an error.
pub async fn select_for_slot(
    State(state): State<AppState>,
    Path(slot_key): Path<String>,
) -> ApiResult<Json<Option<Banner>>> {
    if slot_key.trim().is_empty() {
        return Err(ApiError::BadRequest("slot key must not be empty".to_string()));
    }

    let all_banners = banners::list_banners(&state.db).await?;
    let entries = schedule::list_entries(&state.db, Some(&slot_key)).await?;

    let picked = select_banner(&all_banners, &entries, &slot_key, time::now()).cloned();

    Ok(Json(picked))
}

/// Build selection routes
pub fn selection_routes() -> Router<AppState> {
    Router::new().route("/api/select/:slot_key", get(select_for_slot))
}
