//! Banner catalog database operations
//!
//! Admin CRUD over the creative catalog plus the pilot (fallback) flag.
//! The catalog never hard-deletes: retiring a creative means `active = 0`,
//! so live schedule entries degrade to "ineligible" instead of dangling
//! into an error.

use onair_common::models::Banner;
use onair_common::{Error, Result};
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

/// Fields accepted when creating a banner
#[derive(Debug, Clone, Deserialize)]
pub struct NewBanner {
    pub name: String,
    pub image_url: String,
    #[serde(default)]
    pub click_url: Option<String>,
}

/// Partial update for an existing banner
///
/// The pilot flag is intentionally absent: it moves only through
/// [`set_pilot`], which enforces exclusivity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerUpdate {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub click_url: Option<String>,
    pub active: Option<bool>,
}

type BannerRow = (String, String, String, Option<String>, i64, i64);

fn row_to_banner(row: BannerRow) -> Banner {
    Banner {
        guid: row.0,
        name: row.1,
        image_url: row.2,
        click_url: row.3,
        active: row.4 != 0,
        is_pilot: row.5 != 0,
    }
}

/// Create a banner with defaults `active = true`, `is_pilot = false`
pub async fn create_banner(db: &Pool<Sqlite>, new: NewBanner) -> Result<Banner> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidInput("Banner name must not be empty".to_string()));
    }
    if new.image_url.trim().is_empty() {
        return Err(Error::InvalidInput("Banner image_url must not be empty".to_string()));
    }

    let banner = Banner {
        guid: Uuid::new_v4().to_string(),
        name: new.name,
        image_url: new.image_url,
        click_url: new.click_url,
        active: true,
        is_pilot: false,
    };

    sqlx::query(
        "INSERT INTO banners (guid, name, image_url, click_url, active, is_pilot)
         VALUES (?, ?, ?, ?, 1, 0)",
    )
    .bind(&banner.guid)
    .bind(&banner.name)
    .bind(&banner.image_url)
    .bind(&banner.click_url)
    .execute(db)
    .await?;

    tracing::info!(banner_guid = %banner.guid, name = %banner.name, "Banner created");

    Ok(banner)
}

/// Apply a partial update to an existing banner
pub async fn update_banner(db: &Pool<Sqlite>, guid: &str, update: BannerUpdate) -> Result<Banner> {
    let mut banner = get_banner(db, guid)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Banner {}", guid)))?;

    if let Some(name) = update.name {
        banner.name = name;
    }
    if let Some(image_url) = update.image_url {
        banner.image_url = image_url;
    }
    if let Some(click_url) = update.click_url {
        banner.click_url = Some(click_url);
    }
    if let Some(active) = update.active {
        banner.active = active;
    }

    if banner.name.trim().is_empty() {
        return Err(Error::InvalidInput("Banner name must not be empty".to_string()));
    }
    if banner.image_url.trim().is_empty() {
        return Err(Error::InvalidInput("Banner image_url must not be empty".to_string()));
    }

    sqlx::query(
        "UPDATE banners SET name = ?, image_url = ?, click_url = ?, active = ? WHERE guid = ?",
    )
    .bind(&banner.name)
    .bind(&banner.image_url)
    .bind(&banner.click_url)
    .bind(banner.active as i64)
    .bind(guid)
    .execute(db)
    .await?;

    Ok(banner)
}

/// Fetch a single banner by GUID
pub async fn get_banner(db: &Pool<Sqlite>, guid: &str) -> Result<Option<Banner>> {
    let row: Option<BannerRow> = sqlx::query_as(
        "SELECT guid, name, image_url, click_url, active, is_pilot FROM banners WHERE guid = ?",
    )
    .bind(guid)
    .fetch_optional(db)
    .await?;

    Ok(row.map(row_to_banner))
}

/// List the full catalog, active or not (filtering is the caller's job)
pub async fn list_banners(db: &Pool<Sqlite>) -> Result<Vec<Banner>> {
    let rows: Vec<BannerRow> = sqlx::query_as(
        "SELECT guid, name, image_url, click_url, active, is_pilot FROM banners
         ORDER BY name, guid",
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(row_to_banner).collect())
}

/// Set or clear the pilot flag on a banner
///
/// Setting the flag clears it on every other banner inside the same
/// transaction, so at no instant do two banners carry it. Clearing simply
/// drops the flag; a catalog with zero pilots is a valid state.
pub async fn set_pilot(db: &Pool<Sqlite>, guid: &str, pilot: bool) -> Result<Banner> {
    let mut tx = db.begin().await?;

    if pilot {
        sqlx::query("UPDATE banners SET is_pilot = 0 WHERE is_pilot = 1")
            .execute(&mut *tx)
            .await?;
    }

    let affected = sqlx::query("UPDATE banners SET is_pilot = ? WHERE guid = ?")
        .bind(pilot as i64)
        .bind(guid)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if affected == 0 {
        // Rolls back the clear-all on drop
        return Err(Error::NotFound(format!("Banner {}", guid)));
    }

    tx.commit().await?;

    tracing::info!(banner_guid = %guid, pilot, "Pilot flag updated");

    get_banner(db, guid)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Banner {}", guid)))
}

/// Get the current fallback banner: the unique active banner with the
/// pilot flag, if any
pub async fn get_pilot(db: &Pool<Sqlite>) -> Result<Option<Banner>> {
    let row: Option<BannerRow> = sqlx::query_as(
        "SELECT guid, name, image_url, click_url, active, is_pilot FROM banners
         WHERE is_pilot = 1 AND active = 1 LIMIT 1",
    )
    .fetch_optional(db)
    .await?;

    Ok(row.map(row_to_banner))
}
