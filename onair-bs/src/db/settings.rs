//! Settings database operations
//!
//! Provides get/set accessors for the settings table following the
//! key-value pattern.

use onair_common::{Error, Result};
use sqlx::{Pool, Sqlite};

/// Default seconds between background expiry-cleanup runs
const DEFAULT_CLEANUP_INTERVAL_SECONDS: u64 = 3600;

/// Get background cleanup interval
///
/// **Default:** 3600 seconds
pub async fn get_cleanup_interval_seconds(db: &Pool<Sqlite>) -> Result<u64> {
    get_setting(db, "cleanup_interval_seconds")
        .await
        .map(|opt| opt.unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECONDS))
}

/// Set background cleanup interval
pub async fn set_cleanup_interval_seconds(db: &Pool<Sqlite>, seconds: u64) -> Result<()> {
    set_setting(db, "cleanup_interval_seconds", seconds).await
}

/// Generic setting getter (internal)
async fn get_setting<T>(db: &Pool<Sqlite>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await
        .map_err(Error::Database)?;

    match row {
        Some((value,)) => {
            let parsed = value
                .parse::<T>()
                .map_err(|e| Error::Config(format!("Parse setting failed: {}", e)))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Generic setting setter (internal)
async fn set_setting<T>(db: &Pool<Sqlite>, key: &str, value: T) -> Result<()>
where
    T: std::fmt::Display,
{
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}
