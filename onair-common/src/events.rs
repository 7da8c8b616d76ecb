//! Event types for the OnAir event system
//!
//! Provides shared event definitions and EventBus for all OnAir modules.
//! Admin mutations emit change events; clients subscribed over SSE refetch
//! the affected tables on notification, so the next selection sees fresh
//! data without any explicit cache invalidation API.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// OnAir change-notification events
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OnairEvent {
    /// A banner was created or edited
    ///
    /// Triggers:
    /// - SSE: refetch banner catalog
    BannerUpserted {
        /// Banner GUID that changed
        banner_guid: String,
        /// When the change happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The pilot (fallback) designation changed
    ///
    /// Triggers:
    /// - SSE: refetch banner catalog
    PilotChanged {
        /// New pilot banner GUID (None when the pilot flag was cleared)
        banner_guid: Option<String>,
        /// When the change happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A schedule entry was added or removed for a slot
    ///
    /// Triggers:
    /// - SSE: refetch schedule entries for the slot
    ScheduleChanged {
        /// Slot whose queue changed
        slot_key: String,
        /// When the change happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The columnist list changed; dynamic slots must be re-derived
    ///
    /// Triggers:
    /// - SSE: refetch columnists and recompute the slot registry
    ColumnistsChanged {
        /// When the change happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Expired schedule entries were purged
    ///
    /// Triggers:
    /// - SSE: refetch schedule entries
    ScheduleCleanup {
        /// Number of entries removed
        removed: u64,
        /// When cleanup ran
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl OnairEvent {
    /// Get event type as string for SSE event naming and filtering
    pub fn event_type(&self) -> &str {
        match self {
            OnairEvent::BannerUpserted { .. } => "BannerUpserted",
            OnairEvent::PilotChanged { .. } => "PilotChanged",
            OnairEvent::ScheduleChanged { .. } => "ScheduleChanged",
            OnairEvent::ColumnistsChanged { .. } => "ColumnistsChanged",
            OnairEvent::ScheduleCleanup { .. } => "ScheduleCleanup",
        }
    }
}

/// Central event distribution bus for application-wide change events
///
/// The EventBus uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Lagged message detection for slow subscribers
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<OnairEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Returns a receiver that will receive all events emitted after
    /// subscription. Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<OnairEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: OnairEvent,
    ) -> Result<usize, broadcast::error::SendError<OnairEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    ///
    /// Change notifications are advisory; it is acceptable if no client is
    /// currently connected.
    pub fn emit_lossy(&self, event: OnairEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
