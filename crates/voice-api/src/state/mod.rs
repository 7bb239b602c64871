//! Application state
//!
//! Holds the shared state for the Axum application: the presence dispatcher handle and
//! its task, the database pool used for readiness checks, and configuration.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use voice_common::AppConfig;
use voice_db::SqlitePool;
use voice_service::{PresenceHandle, PresenceTracker};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Handle to the presence dispatcher
    presence: PresenceHandle,
    /// Dispatcher task, taken once on shutdown
    dispatcher: Arc<Mutex<Option<JoinHandle<PresenceTracker>>>>,
    /// Session log connection pool
    pool: SqlitePool,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        presence: PresenceHandle,
        dispatcher: JoinHandle<PresenceTracker>,
        pool: SqlitePool,
        config: AppConfig,
    ) -> Self {
        Self {
            presence,
            dispatcher: Arc::new(Mutex::new(Some(dispatcher))),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get the presence dispatcher handle
    pub fn presence(&self) -> &PresenceHandle {
        &self.presence
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Stop the dispatcher and wait until every queued transition has been persisted.
    ///
    /// Returns the final tracker, or `None` if it was already stopped by another caller
    /// or its task failed.
    pub async fn stop_presence(&self) -> Option<PresenceTracker> {
        let task = self.dispatcher.lock().await.take()?;

        if self.presence.shutdown().await.is_err() {
            warn!("Presence dispatcher already stopped");
        }

        match task.await {
            Ok(tracker) => {
                info!(
                    open_sessions = tracker.active_count(),
                    "Presence dispatcher drained"
                );
                Some(tracker)
            }
            Err(e) => {
                error!(error = %e, "Presence dispatcher task failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("presence", &self.presence)
            .field("pool", &"SqlitePool")
            .field("config", &"AppConfig")
            .finish_non_exhaustive()
    }
}
