//! Columnist database operations
//!
//! The columnist table drives the dynamic part of the slot registry: every
//! columnist with an active profile contributes a `columnist-<guid>` slot.

use onair_common::models::Columnist;
use onair_common::{Error, Result};
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

/// Fields accepted when registering a columnist
#[derive(Debug, Clone, Deserialize)]
pub struct NewColumnist {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Register a columnist
pub async fn create_columnist(db: &Pool<Sqlite>, new: NewColumnist) -> Result<Columnist> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidInput("Columnist name must not be empty".to_string()));
    }

    let columnist = Columnist {
        guid: Uuid::new_v4().to_string(),
        name: new.name,
        is_active: new.is_active,
    };

    sqlx::query("INSERT INTO columnists (guid, name, is_active) VALUES (?, ?, ?)")
        .bind(&columnist.guid)
        .bind(&columnist.name)
        .bind(columnist.is_active as i64)
        .execute(db)
        .await?;

    Ok(columnist)
}

/// Toggle a columnist's active profile flag
pub async fn set_columnist_active(db: &Pool<Sqlite>, guid: &str, is_active: bool) -> Result<()> {
    let affected = sqlx::query("UPDATE columnists SET is_active = ? WHERE guid = ?")
        .bind(is_active as i64)
        .bind(guid)
        .execute(db)
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(Error::NotFound(format!("Columnist {}", guid)));
    }

    Ok(())
}

/// List all columnists, active or not
pub async fn list_columnists(db: &Pool<Sqlite>) -> Result<Vec<Columnist>> {
    let rows: Vec<(String, String, i64)> =
        sqlx::query_as("SELECT guid, name, is_active FROM columnists ORDER BY name, guid")
            .fetch_all(db)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(guid, name, is_active)| Columnist {
            guid,
            name,
            is_active: is_active != 0,
        })
        .collect())
}
