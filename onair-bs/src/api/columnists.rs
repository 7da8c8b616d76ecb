//! Columnist endpoints
//!
//! Minimal surface over the columnist table, enough to drive the dynamic
//! slot registry: register, list, and toggle the active profile flag.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db::columnists::{self, NewColumnist};
use crate::{ApiResult, AppState};
use onair_common::events::OnairEvent;
use onair_common::models::Columnist;
use onair_common::time;

/// GET /api/columnists
pub async fn list_columnists(State(state): State<AppState>) -> ApiResult<Json<Vec<Columnist>>> {
    let all = columnists::list_columnists(&state.db).await?;
    Ok(Json(all))
}

/// POST /api/columnists
pub async fn create_columnist(
    State(state): State<AppState>,
    Json(new): Json<NewColumnist>,
) -> ApiResult<(StatusCode, Json<Columnist>)> {
    let columnist = columnists::create_columnist(&state.db, new).await?;

    state.event_bus.emit_lossy(OnairEvent::ColumnistsChanged {
        timestamp: time::now(),
    });

    Ok((StatusCode::CREATED, Json(columnist)))
}

/// Body for PUT /api/columnists/:guid/active
#[derive(Debug, Deserialize)]
pub struct ActiveRequest {
    pub is_active: bool,
}

/// PUT /api/columnists/:guid/active
///
/// Toggling the profile adds or removes the columnist's slot on the next
/// registry derivation.
pub async fn set_active(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(req): Json<ActiveRequest>,
) -> ApiResult<StatusCode> {
    columnists::set_columnist_active(&state.db, &guid, req.is_active).await?;

    state.event_bus.emit_lossy(OnairEvent::ColumnistsChanged {
        timestamp: time::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}

/// Build columnist routes
pub fn columnist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/columnists", get(list_columnists).post(create_columnist))
        .route("/api/columnists/:guid/active", put(set_active))
}
