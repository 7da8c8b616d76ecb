//! onair-bs - Banner Scheduler microservice
//!
//! Owns banner rotation for the OnAir portal: catalog, per-slot schedule
//! queue, slot registry, pilot fallback, render-time selection, expiry
//! cleanup. Integrates with the portal console via HTTP REST + SSE.

use anyhow::Result;
use tracing::info;

use onair_bs::{build_router, cleanup, AppState};
use onair_common::events::EventBus;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting onair-bs (Banner Scheduler) microservice");
    info!("Port: 5731");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve root folder (CLI arg > env > config file > OS default)
    let cli_root = std::env::args().nth(1);
    let root_folder = onair_common::config::resolve_root_folder(cli_root.as_deref());
    onair_common::config::ensure_root_folder(&root_folder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize root folder: {}", e))?;

    // Open or create database
    let db_path = onair_common::config::database_path(&root_folder);
    info!("Database: {}", db_path.display());

    let db_pool = onair_bs::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // Create event bus for SSE broadcasting
    let event_bus = EventBus::new(100);
    info!("Event bus initialized");

    // Create application state
    let state = AppState::new(db_pool, event_bus);

    // Periodic expiry cleanup (selection itself never mutates)
    cleanup::spawn_cleanup_task(state.clone());

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("127.0.0.1:5731").await?;
    info!("Listening on http://127.0.0.1:5731");
    info!("Health check: http://127.0.0.1:5731/health");

    axum::serve(listener, app).await?;

    Ok(())
}
