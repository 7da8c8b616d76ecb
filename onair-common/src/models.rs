//! Domain models shared across OnAir microservices

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A creative asset: image plus optional click-through target.
///
/// `active` gates eligibility for selection entirely, independent of any
/// schedule. At most one active banner carries `is_pilot`; that banner is
/// the global fallback when a slot has no valid scheduled entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub guid: String,
    pub name: String,
    pub image_url: String,
    pub click_url: Option<String>,
    pub active: bool,
    pub is_pilot: bool,
}

/// Assignment of one banner to one slot for a validity window.
///
/// `starts_at` absent means immediately valid; `ends_at` absent means the
/// entry never expires. Higher `priority` wins; ties break on `guid`
/// ascending so repeated selections are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub guid: String,
    pub slot_key: String,
    pub banner_guid: String,
    pub priority: i64,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// A columnist profile. Each active columnist contributes a dynamic
/// `columnist-<guid>` slot to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Columnist {
    pub guid: String,
    pub name: String,
    pub is_active: bool,
}
