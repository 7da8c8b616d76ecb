//! Background expiry cleanup
//!
//! Periodically purges schedule entries whose window has fully elapsed.
//! Selection stays a pure read; this task (and the on-demand cleanup
//! endpoint) are the only paths that remove expired entries.

use crate::db;
use crate::AppState;
use onair_common::events::OnairEvent;
use onair_common::time;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Spawn the periodic cleanup loop
///
/// Interval comes from the `cleanup_interval_seconds` setting (default one
/// hour). Removals are broadcast as ScheduleCleanup so connected clients
/// refetch.
pub fn spawn_cleanup_task(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let interval_seconds = match db::settings::get_cleanup_interval_seconds(&state.db).await {
            Ok(seconds) => seconds,
            Err(e) => {
                warn!("Failed to read cleanup interval, using default: {}", e);
                3600
            }
        };

        info!("Expiry cleanup task running every {} seconds", interval_seconds);

        let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));
        // First tick fires immediately; skip it so startup isn't a cleanup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match db::schedule::cleanup_expired(&state.db, time::now()).await {
                Ok(0) => debug!("Cleanup pass removed no entries"),
                Ok(removed) => {
                    info!("Cleanup pass removed {} expired schedule entries", removed);
                    state.event_bus.emit_lossy(OnairEvent::ScheduleCleanup {
                        removed,
                        timestamp: time::now(),
                    });
                }
                Err(e) => warn!("Cleanup pass failed: {}", e),
            }
        }
    })
}
