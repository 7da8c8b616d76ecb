//! Slot registry endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::db::columnists;
use crate::slots::{derive_slots, Slot};
use crate::{ApiResult, AppState};

/// GET /api/slots
///
/// Derived fresh from the columnist table on every request; the registry
/// is never cached server-side.
pub async fn list_slots(State(state): State<AppState>) -> ApiResult<Json<Vec<Slot>>> {
    let columnists = columnists::list_columnists(&state.db).await?;
    Ok(Json(derive_slots(&columnists)))
}

/// Build slot registry routes
pub fn slot_routes() -> Router<AppState> {
    Router::new().route("/api/slots", get(list_slots))
}
