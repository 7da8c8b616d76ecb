//! Schedule queue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::schedule::{self, NewScheduleEntry};
use crate::{ApiResult, AppState};
use onair_common::events::OnairEvent;
use onair_common::models::ScheduleEntry;
use onair_common::time;

/// Query parameters for GET /api/schedule
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Restrict listing to one slot key
    pub slot: Option<String>,
}

/// GET /api/schedule[?slot=...]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<Vec<ScheduleEntry>>> {
    let entries = schedule::list_entries(&state.db, query.slot.as_deref()).await?;
    Ok(Json(entries))
}

/// POST /api/schedule
pub async fn add_entry(
    State(state): State<AppState>,
    Json(new): Json<NewScheduleEntry>,
) -> ApiResult<(StatusCode, Json<ScheduleEntry>)> {
    let entry = schedule::add_entry(&state.db, new).await?;

    state.event_bus.emit_lossy(OnairEvent::ScheduleChanged {
        slot_key: entry.slot_key.clone(),
        timestamp: time::now(),
    });

    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/schedule/:guid
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> ApiResult<StatusCode> {
    let entry = schedule::delete_entry(&state.db, &guid).await?;

    state.event_bus.emit_lossy(OnairEvent::ScheduleChanged {
        slot_key: entry.slot_key,
        timestamp: time::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}

/// Response for POST /api/schedule/cleanup
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    /// Number of expired entries removed
    pub removed: u64,
}

/// POST /api/schedule/cleanup
///
/// On-demand expiry purge, the same operation the background task runs.
pub async fn run_cleanup(State(state): State<AppState>) -> ApiResult<Json<CleanupResponse>> {
    let removed = schedule::cleanup_expired(&state.db, time::now()).await?;

    if removed > 0 {
        state.event_bus.emit_lossy(OnairEvent::ScheduleCleanup {
            removed,
            timestamp: time::now(),
        });
    }

    Ok(Json(CleanupResponse { removed }))
}

/// Build schedule queue routes
pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/api/schedule", get(list_entries).post(add_entry))
        .route("/api/schedule/cleanup", post(run_cleanup))
        .route("/api/schedule/:guid", delete(delete_entry))
}
