//! Banner catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db::banners::{self, BannerUpdate, NewBanner};
use crate::{ApiResult, AppState};
use onair_common::events::OnairEvent;
use onair_common::models::Banner;
use onair_common::time;

/// GET /api/banners
///
/// Full catalog, active and inactive; filtering is the caller's job.
pub async fn list_banners(State(state): State<AppState>) -> ApiResult<Json<Vec<Banner>>> {
    let all = banners::list_banners(&state.db).await?;
    Ok(Json(all))
}

/// POST /api/banners
pub async fn create_banner(
    State(state): State<AppState>,
    Json(new): Json<NewBanner>,
) -> ApiResult<(StatusCode, Json<Banner>)> {
    let banner = banners::create_banner(&state.db, new).await?;

    state.event_bus.emit_lossy(OnairEvent::BannerUpserted {
        banner_guid: banner.guid.clone(),
        timestamp: time::now(),
    });

    Ok((StatusCode::CREATED, Json(banner)))
}

/// PATCH /api/banners/:guid
pub async fn update_banner(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(update): Json<BannerUpdate>,
) -> ApiResult<Json<Banner>> {
    let banner = banners::update_banner(&state.db, &guid, update).await?;

    state.event_bus.emit_lossy(OnairEvent::BannerUpserted {
        banner_guid: banner.guid.clone(),
        timestamp: time::now(),
    });

    Ok(Json(banner))
}

/// Body for PUT /api/banners/:guid/pilot
#[derive(Debug, Deserialize)]
pub struct PilotRequest {
    pub pilot: bool,
}

/// PUT /api/banners/:guid/pilot
///
/// Promoting a banner silently demotes the previous pilot; demoting leaves
/// the catalog with zero pilots, which is a valid state.
pub async fn set_pilot(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(req): Json<PilotRequest>,
) -> ApiResult<Json<Banner>> {
    let banner = banners::set_pilot(&state.db, &guid, req.pilot).await?;

    state.event_bus.emit_lossy(OnairEvent::PilotChanged {
        banner_guid: req.pilot.then(|| banner.guid.clone()),
        timestamp: time::now(),
    });

    Ok(Json(banner))
}

/// Build banner catalog routes
pub fn banner_routes() -> Router<AppState> {
    Router::new()
        .route("/api/banners", get(list_banners).post(create_banner))
        .route("/api/banners/:guid", patch(update_banner))
        .route("/api/banners/:guid/pilot", put(set_pilot))
}
