//! SQLite implementation of SessionRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use voice_core::entities::{PresenceKey, SessionRecord};
use voice_core::traits::{RepoResult, SessionQuery, SessionRepository};

use crate::mappers::SessionRecordInsert;
use crate::models::SessionRecordModel;

use super::error::map_db_error;

/// SQLite implementation of SessionRepository
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    /// Create a new SqliteSessionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    #[instrument(skip(self, record), fields(key = %record.key()))]
    async fn append(&self, record: &SessionRecord) -> RepoResult<()> {
        let insert = SessionRecordInsert::new(record);

        // A single autocommit INSERT: durable once execute returns
        sqlx::query(
            r#"
            INSERT INTO voice_records (user_id, guild_id, channel_id, start_ts, end_ts)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&insert.user_id)
        .bind(&insert.guild_id)
        .bind(&insert.channel_id)
        .bind(insert.start_ts)
        .bind(insert.end_ts)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(
            channel_id = ?insert.channel_id,
            duration_secs = record.duration_secs(),
            "Recorded voice session"
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn sum_duration_ms(&self, query: &SessionQuery) -> RepoResult<i64> {
        let total = match query.channel_id {
            Some(channel_id) => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COALESCE(SUM(end_ts - start_ts), 0)
                    FROM voice_records
                    WHERE user_id = ? AND guild_id = ? AND channel_id = ? AND start_ts >= ?
                    "#,
                )
                .bind(query.user_id.to_string())
                .bind(query.guild_id.to_string())
                .bind(channel_id.to_string())
                .bind(query.since)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COALESCE(SUM(end_ts - start_ts), 0)
                    FROM voice_records
                    WHERE user_id = ? AND guild_id = ? AND start_ts >= ?
                    "#,
                )
                .bind(query.user_id.to_string())
                .bind(query.guild_id.to_string())
                .bind(query.since)
                .fetch_one(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(total)
    }

    #[instrument(skip(self))]
    async fn count(&self, key: PresenceKey) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM voice_records WHERE user_id = ? AND guild_id = ?
            "#,
        )
        .bind(key.user_id.to_string())
        .bind(key.guild_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_key(&self, key: PresenceKey) -> RepoResult<Vec<SessionRecord>> {
        let rows = sqlx::query_as::<_, SessionRecordModel>(
            r#"
            SELECT user_id, guild_id, channel_id, start_ts, end_ts
            FROM voice_records
            WHERE user_id = ? AND guild_id = ?
            ORDER BY start_ts, rowid
            "#,
        )
        .bind(key.user_id.to_string())
        .bind(key.guild_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(SessionRecord::try_from).collect()
    }
}
