//! SQLite connection pool management

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;
use voice_common::SyncMode;

/// Database configuration for connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (`sqlite://path/to.db` or `sqlite::memory:`)
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// `synchronous` pragma applied to every connection
    pub synchronous: SyncMode,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// How long a connection waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("sqlite://voiceTime.db"),
            max_connections: 5,
            synchronous: SyncMode::Full,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&voice_common::DatabaseConfig> for DatabaseConfig {
    fn from(config: &voice_common::DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            synchronous: config.synchronous,
            ..Default::default()
        }
    }
}

impl DatabaseConfig {
    /// In-memory config (single shared connection), used by tests
    pub fn in_memory() -> Self {
        Self {
            url: String::from("sqlite::memory:"),
            ..Default::default()
        }
    }

    /// Whether the URL points at an in-memory database
    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

fn synchronous(mode: SyncMode) -> SqliteSynchronous {
    match mode {
        SyncMode::Off => SqliteSynchronous::Off,
        SyncMode::Normal => SqliteSynchronous::Normal,
        SyncMode::Full => SqliteSynchronous::Full,
        SyncMode::Extra => SqliteSynchronous::Extra,
    }
}

/// Create a new SQLite connection pool
///
/// The database file is created if missing and opened in WAL mode. An in-memory database
/// lives only as long as its connection, so it is pinned to one connection that never
/// expires.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(synchronous(config.synchronous))
        .busy_timeout(config.busy_timeout);

    let pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout);

    let pool_options = if config.is_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    pool_options.connect_with(options).await
}
