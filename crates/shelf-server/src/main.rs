//! Shelf Server binary
//!
//! Loads settings from the environment, opens the SQLite database and serves
//! the HTTP API.

use anyhow::{Context, Result};
use shelf_server::settings::Settings;
use shelf_server::storage::Database;
use shelf_server::AppState;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    info!(
        "Starting {} v{} ({:?})",
        settings.project_name,
        env!("CARGO_PKG_VERSION"),
        settings.environment
    );
    info!(
        "Config loaded: bind={}, db={}, cors={:?}",
        settings.bind_address,
        settings.database_path,
        settings.all_cors_origins()
    );

    let db = Database::new(&settings.database_path)
        .await
        .context("Failed to initialize database")?;

    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let app = shelf_server::app(AppState::new(db, settings)).context("Failed to build router")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
