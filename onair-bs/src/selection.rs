//! Render-time banner selection
//!
//! The one hot-path computation in this module: given a snapshot of the
//! catalog and the schedule, pick the single banner to display for a slot.
//! Pure and synchronous over already-fetched data; callers own the I/O.
//! Repeated calls with identical input return the identical banner, so a
//! page never flickers between equally-prioritized creatives on re-render.

use chrono::{DateTime, Utc};
use onair_common::models::{Banner, ScheduleEntry};

/// Whether an entry's validity window contains `now`
///
/// Start is inclusive, end is exclusive: at exactly `ends_at` the entry is
/// already expired, so a creative never shows for one boundary instant.
pub fn window_contains(entry: &ScheduleEntry, now: DateTime<Utc>) -> bool {
    if let Some(starts) = entry.starts_at {
        if starts > now {
            return false;
        }
    }
    if let Some(ends) = entry.ends_at {
        if ends <= now {
            return false;
        }
    }
    true
}

/// Pick the banner to display for `slot_key` at instant `now`
///
/// In order:
/// 1. Keep entries for the slot whose banner exists, is active, and whose
///    window contains `now`. Entries referencing a missing banner are
///    silently ineligible.
/// 2. Order by priority descending, tie-break by entry guid ascending.
/// 3. Return the head's banner; with no eligible entry, fall back to the
///    active pilot banner; with no pilot, return None (render nothing).
pub fn select_banner<'a>(
    banners: &'a [Banner],
    entries: &[ScheduleEntry],
    slot_key: &str,
    now: DateTime<Utc>,
) -> Option<&'a Banner> {
    let find_banner = |guid: &str| banners.iter().find(|b| b.guid == guid);

    let mut eligible: Vec<&ScheduleEntry> = entries
        .iter()
        .filter(|e| e.slot_key == slot_key)
        .filter(|e| window_contains(e, now))
        .filter(|e| find_banner(&e.banner_guid).is_some_and(|b| b.active))
        .collect();

    eligible.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.guid.cmp(&b.guid))
    });

    match eligible.first() {
        Some(entry) => find_banner(&entry.banner_guid),
        None => banners.iter().find(|b| b.is_pilot && b.active),
    }
}
