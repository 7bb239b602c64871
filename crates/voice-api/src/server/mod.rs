//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use voice_common::{AppConfig, AppError};
use voice_db::{create_pool, run_migrations, DatabaseConfig, SqliteSessionRepository};
use voice_service::PresenceDispatcher;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// Opens the session log, migrates it, and starts the presence dispatcher. A failed
/// migration is fatal.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!(url = %config.database.url, "Opening session log...");
    let db_config = DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let outcome = run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!(changed = outcome.changed(), "Session log ready");

    // Start the presence dispatcher
    let repository = Arc::new(SqliteSessionRepository::new(pool.clone()));
    let (presence, task) = PresenceDispatcher::spawn(repository, config.tracker.command_buffer);

    Ok(AppState::new(presence, task, pool, config))
}

/// Run the HTTP server until Ctrl+C, then drain the dispatcher
pub async fn run_server(app: Router, address: &str, state: AppState) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)?;

    // Accepted transitions are persisted before the process exits
    state.stop_presence().await;
    info!("Server stopped");

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state.clone());

    // Run server
    run_server(app, &address, state).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
