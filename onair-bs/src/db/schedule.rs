//! Schedule queue database operations
//!
//! Each row assigns one banner to one slot for a validity window. Entries
//! are created by the admin "add to queue" action and leave the table only
//! through an explicit delete or [`cleanup_expired`]; selection never
//! mutates them.

use chrono::{DateTime, Utc};
use onair_common::models::ScheduleEntry;
use onair_common::{time, Error, Result};
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

/// Fields accepted when adding a banner to a slot queue
#[derive(Debug, Clone, Deserialize)]
pub struct NewScheduleEntry {
    pub slot_key: String,
    pub banner_guid: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

type EntryRow = (String, String, String, i64, Option<String>, Option<String>);

fn row_to_entry(row: EntryRow) -> Result<ScheduleEntry> {
    Ok(ScheduleEntry {
        guid: row.0,
        slot_key: row.1,
        banner_guid: row.2,
        priority: row.3,
        starts_at: time::from_db_opt(row.4.as_deref())?,
        ends_at: time::from_db_opt(row.5.as_deref())?,
    })
}

/// Add an entry to a slot queue
///
/// The referenced banner must exist at insert time; later catalog changes
/// may still leave the entry dangling, which selection tolerates.
pub async fn add_entry(db: &Pool<Sqlite>, new: NewScheduleEntry) -> Result<ScheduleEntry> {
    if new.slot_key.trim().is_empty() {
        return Err(Error::InvalidInput("slot_key must not be empty".to_string()));
    }
    if let (Some(starts), Some(ends)) = (new.starts_at, new.ends_at) {
        if ends <= starts {
            return Err(Error::InvalidInput(
                "ends_at must be after starts_at".to_string(),
            ));
        }
    }
    if super::banners::get_banner(db, &new.banner_guid).await?.is_none() {
        return Err(Error::InvalidInput(format!(
            "Unknown banner: {}",
            new.banner_guid
        )));
    }

    let entry = ScheduleEntry {
        guid: Uuid::new_v4().to_string(),
        slot_key: new.slot_key,
        banner_guid: new.banner_guid,
        priority: new.priority,
        starts_at: new.starts_at,
        ends_at: new.ends_at,
    };

    sqlx::query(
        "INSERT INTO banner_schedule (guid, slot_key, banner_guid, priority, starts_at, ends_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&entry.guid)
    .bind(&entry.slot_key)
    .bind(&entry.banner_guid)
    .bind(entry.priority)
    .bind(entry.starts_at.map(time::to_db))
    .bind(entry.ends_at.map(time::to_db))
    .execute(db)
    .await?;

    tracing::info!(
        entry_guid = %entry.guid,
        slot_key = %entry.slot_key,
        banner_guid = %entry.banner_guid,
        priority = entry.priority,
        "Schedule entry added"
    );

    Ok(entry)
}

/// List schedule entries, optionally restricted to one slot
///
/// Ordered by priority descending then guid ascending, matching the
/// selection order.
pub async fn list_entries(db: &Pool<Sqlite>, slot_key: Option<&str>) -> Result<Vec<ScheduleEntry>> {
    let rows: Vec<EntryRow> = match slot_key {
        Some(slot) => {
            sqlx::query_as(
                "SELECT guid, slot_key, banner_guid, priority, starts_at, ends_at
                 FROM banner_schedule WHERE slot_key = ?
                 ORDER BY priority DESC, guid ASC",
            )
            .bind(slot)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT guid, slot_key, banner_guid, priority, starts_at, ends_at
                 FROM banner_schedule
                 ORDER BY priority DESC, guid ASC",
            )
            .fetch_all(db)
            .await?
        }
    };

    rows.into_iter().map(row_to_entry).collect()
}

/// Delete one schedule entry
pub async fn delete_entry(db: &Pool<Sqlite>, guid: &str) -> Result<ScheduleEntry> {
    let row: Option<EntryRow> = sqlx::query_as(
        "SELECT guid, slot_key, banner_guid, priority, starts_at, ends_at
         FROM banner_schedule WHERE guid = ?",
    )
    .bind(guid)
    .fetch_optional(db)
    .await?;

    let entry = row
        .map(row_to_entry)
        .transpose()?
        .ok_or_else(|| Error::NotFound(format!("Schedule entry {}", guid)))?;

    sqlx::query("DELETE FROM banner_schedule WHERE guid = ?")
        .bind(guid)
        .execute(db)
        .await?;

    Ok(entry)
}

/// Remove every entry whose window has fully elapsed (`ends_at < now`)
///
/// Entries without `ends_at` are permanent and never removed. Idempotent:
/// a second run with no new entries removes zero. Window comparison stays
/// in chrono, matching the selection path, so stored timestamps in any
/// RFC 3339 offset compare correctly.
pub async fn cleanup_expired(db: &Pool<Sqlite>, now: DateTime<Utc>) -> Result<u64> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT guid, ends_at FROM banner_schedule WHERE ends_at IS NOT NULL",
    )
    .fetch_all(db)
    .await?;

    let mut expired = Vec::new();
    for (guid, ends_at) in rows {
        if time::from_db(&ends_at)? < now {
            expired.push(guid);
        }
    }

    if expired.is_empty() {
        return Ok(0);
    }

    let mut tx = db.begin().await?;
    for guid in &expired {
        sqlx::query("DELETE FROM banner_schedule WHERE guid = ?")
            .bind(guid)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(expired.len() as u64)
}
