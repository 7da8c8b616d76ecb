//! Slot registry
//!
//! Placement keys are not fixed at compile time: the static layout and
//! section slots are, but every columnist with an active profile
//! contributes a `columnist-<guid>` slot. The registry is therefore a pure
//! derivation over the current columnist list, recomputed on every call;
//! nothing here is cached, so it can never go stale while columnists are
//! toggled.

use onair_common::models::Columnist;
use serde::{Deserialize, Serialize};

/// Prefix for dynamically derived columnist slots
pub const COLUMNIST_SLOT_PREFIX: &str = "columnist-";

/// Fixed content sections of the portal, one banner slot each
const SECTIONS: &[(&str, &str)] = &[
    ("news", "News"),
    ("politics", "Politics"),
    ("economy", "Economy"),
    ("sports", "Sports"),
    ("culture", "Culture"),
];

/// Where a slot comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    /// Fixed page-layout placements (hero, sidebar, footer)
    Layout,
    /// One slot per fixed content section
    Section,
    /// One slot per active columnist
    Columnist,
}

/// A placement where a banner can be shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub key: String,
    pub label: String,
    pub category: SlotCategory,
}

fn static_slot(key: &str, label: &str, category: SlotCategory) -> Slot {
    Slot {
        key: key.to_string(),
        label: label.to_string(),
        category,
    }
}

/// Derive the full ordered slot registry from the current columnist list
///
/// Static slots come first in fixed order; columnist slots follow, sorted
/// by name then guid so the listing is stable across queries. Only
/// columnists with an active profile appear.
pub fn derive_slots(columnists: &[Columnist]) -> Vec<Slot> {
    let mut slots = vec![static_slot("hero", "Hero", SlotCategory::Layout)];

    for (key, label) in SECTIONS {
        slots.push(static_slot(key, label, SlotCategory::Section));
    }

    slots.push(static_slot("sidebar", "Sidebar", SlotCategory::Layout));
    slots.push(static_slot("footer", "Footer", SlotCategory::Layout));

    let mut active: Vec<&Columnist> = columnists.iter().filter(|c| c.is_active).collect();
    active.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.guid.cmp(&b.guid)));

    for columnist in active {
        slots.push(Slot {
            key: format!("{}{}", COLUMNIST_SLOT_PREFIX, columnist.guid),
            label: columnist.name.clone(),
            category: SlotCategory::Columnist,
        });
    }

    slots
}
