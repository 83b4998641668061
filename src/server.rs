//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, the optional cleanup worker, and the Axum server
//! lifecycle.

use crate::application::services::{MaintenanceService, run_cleanup_worker};
use crate::config::Config;
use crate::infrastructure::Storage;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory)
/// - Background cleanup worker, if `CLEANUP_INTERVAL_SECONDS > 0`
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = Storage::connect(&config, true).await?;

    if config.is_cleanup_scheduled() {
        let maintenance = Arc::new(MaintenanceService::new(
            storage.allocator.clone(),
            storage.url_repository.clone(),
        ));
        tokio::spawn(run_cleanup_worker(
            maintenance,
            config.max_days_to_store,
            Duration::from_secs(config.cleanup_interval_seconds),
        ));
        tracing::info!(
            interval_seconds = config.cleanup_interval_seconds,
            max_days = config.max_days_to_store,
            "Cleanup worker started"
        );
    }

    let state = AppState::new(&storage, &config.root_uri);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
