//! Database access for onair-bs
//!
//! Shared SQLite database access. Schedule windows are stored as RFC 3339
//! TEXT and parsed in Rust, so window comparisons happen in exactly one
//! place (chrono) for both selection and cleanup.

pub mod banners;
pub mod columnists;
pub mod schedule;
pub mod settings;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Connects to the shared onair.db in the root folder, creating it if
/// missing, and runs table migrations.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize onair-bs tables
///
/// Creates banners, banner_schedule, columnists and settings tables if they
/// don't exist. banner_schedule.banner_guid deliberately carries no foreign
/// key: a dangling reference makes the entry ineligible, never an error.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS banners (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            image_url TEXT NOT NULL,
            click_url TEXT,
            active INTEGER NOT NULL DEFAULT 1,
            is_pilot INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS banner_schedule (
            guid TEXT PRIMARY KEY,
            slot_key TEXT NOT NULL,
            banner_guid TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 0,
            starts_at TEXT,
            ends_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS columnists (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (banners, banner_schedule, columnists, settings)");

    Ok(())
}
