//! onair-bs - Banner Scheduler microservice
//!
//! Owns the advertising rotation engine for the OnAir portal: the banner
//! catalog, the per-slot schedule queue, the slot registry (static slots
//! plus one per active columnist), pilot fallback designation, render-time
//! banner selection, and expiry cleanup.
//!
//! Selection itself is a pure function over a snapshot of catalog and
//! schedule data (see [`selection`]); everything async lives at the edges.

pub mod api;
pub mod cleanup;
pub mod db;
pub mod error;
pub mod selection;
pub mod slots;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use onair_common::events::EventBus;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Event bus for change-notification broadcasting
    pub event_bus: EventBus,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, event_bus: EventBus) -> Self {
        Self {
            db,
            event_bus,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::banner_routes())
        .merge(api::columnist_routes())
        .merge(api::schedule_routes())
        .merge(api::slot_routes())
        .merge(api::selection_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .with_state(state)
}
