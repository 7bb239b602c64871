//! Schema migration for the session log
//!
//! The `voice_records` table predates channel tracking, so a store may exist without the
//! `channel_id` column. The migration inspects the live schema and only runs the steps
//! that are missing, inside one transaction. Running it against an up-to-date store is a
//! no-op reported as [`MigrationOutcome::AlreadyApplied`]; any real failure surfaces as a
//! [`MigrationError`].

use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::{info, instrument};

const TABLE: &str = "voice_records";
const MEMBER_INDEX: &str = "idx_voice_records_member";

/// Result of a successful migration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// At least one step ran; names of the steps in execution order
    Applied(Vec<&'static str>),
    /// The schema was already current
    AlreadyApplied,
}

impl MigrationOutcome {
    /// Whether any schema change was made
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Migration failure
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration step '{step}' failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl MigrationError {
    fn step(step: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Step { step, source }
    }
}

/// Bring the session log schema up to date
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<MigrationOutcome, MigrationError> {
    let mut tx = pool.begin().await.map_err(MigrationError::step("begin"))?;
    let mut applied = Vec::new();

    if !table_exists(&mut tx).await? {
        sqlx::query(
            r#"
            CREATE TABLE voice_records (
                user_id TEXT NOT NULL,
                guild_id TEXT NOT NULL,
                channel_id TEXT,
                start_ts INTEGER NOT NULL,
                end_ts INTEGER NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(MigrationError::step("create_table"))?;
        applied.push("create_table");
    } else if !has_column(&mut tx, "channel_id").await? {
        sqlx::query("ALTER TABLE voice_records ADD COLUMN channel_id TEXT")
            .execute(&mut *tx)
            .await
            .map_err(MigrationError::step("add_channel_id"))?;
        applied.push("add_channel_id");
    }

    if !index_exists(&mut tx).await? {
        sqlx::query(
            r#"
            CREATE INDEX idx_voice_records_member
            ON voice_records (guild_id, user_id, start_ts)
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(MigrationError::step("create_member_index"))?;
        applied.push("create_member_index");
    }

    tx.commit().await.map_err(MigrationError::step("commit"))?;

    if applied.is_empty() {
        info!("Session log schema already up to date");
        Ok(MigrationOutcome::AlreadyApplied)
    } else {
        info!(steps = ?applied, "Session log schema migrated");
        Ok(MigrationOutcome::Applied(applied))
    }
}

async fn table_exists(tx: &mut Transaction<'_, Sqlite>) -> Result<bool, MigrationError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(TABLE)
    .fetch_one(&mut **tx)
    .await
    .map_err(MigrationError::step("inspect_table"))?;

    Ok(count > 0)
}

async fn has_column(tx: &mut Transaction<'_, Sqlite>, column: &str) -> Result<bool, MigrationError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?",
    )
    .bind(TABLE)
    .bind(column)
    .fetch_one(&mut **tx)
    .await
    .map_err(MigrationError::step("inspect_columns"))?;

    Ok(count > 0)
}

async fn index_exists(tx: &mut Transaction<'_, Sqlite>) -> Result<bool, MigrationError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?",
    )
    .bind(MEMBER_INDEX)
    .fetch_one(&mut **tx)
    .await
    .map_err(MigrationError::step("inspect_index"))?;

    Ok(count > 0)
}
