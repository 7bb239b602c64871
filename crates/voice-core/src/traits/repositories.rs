//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{PresenceKey, SessionRecord};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Session Repository
// ============================================================================

/// Filter for summed-duration queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionQuery {
    pub user_id: Snowflake,
    pub guild_id: Snowflake,
    /// Only records with `started_at >= since` (unix milliseconds)
    pub since: i64,
    /// Only records in this channel; legacy records without a channel never match
    pub channel_id: Option<Snowflake>,
}

impl SessionQuery {
    /// Query every record of a user in a guild
    pub fn new(user_id: Snowflake, guild_id: Snowflake) -> Self {
        Self {
            user_id,
            guild_id,
            since: 0,
            channel_id: None,
        }
    }

    /// Query every record of a presence key
    pub fn for_key(key: PresenceKey) -> Self {
        Self::new(key.user_id, key.guild_id)
    }

    /// Restrict to records starting at or after `since`
    #[must_use]
    pub fn since(mut self, since: i64) -> Self {
        self.since = since;
        self
    }

    /// Restrict to one channel (or clear the restriction with `None`)
    #[must_use]
    pub fn channel(mut self, channel_id: Option<Snowflake>) -> Self {
        self.channel_id = channel_id;
        self
    }

    /// Whether a record satisfies this filter
    pub fn matches(&self, record: &SessionRecord) -> bool {
        record.user_id == self.user_id
            && record.guild_id == self.guild_id
            && record.started_at >= self.since
            && self
                .channel_id
                .is_none_or(|channel| record.channel_id == Some(channel))
    }
}

/// Durable append-only log of completed voice sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Durably append one record.
    ///
    /// Returns only after the write is committed. Not idempotent: appending the same
    /// record twice stores it twice.
    async fn append(&self, record: &SessionRecord) -> RepoResult<()>;

    /// Sum of `ended_at - started_at` in milliseconds over matching records (0 if none)
    async fn sum_duration_ms(&self, query: &SessionQuery) -> RepoResult<i64>;

    /// Number of records stored for a presence key
    async fn count(&self, key: PresenceKey) -> RepoResult<i64>;

    /// All records of a presence key, oldest first
    async fn find_by_key(&self, key: PresenceKey) -> RepoResult<Vec<SessionRecord>>;

    /// Sum of matching durations in whole seconds (0 if none)
    async fn sum_duration(&self, query: &SessionQuery) -> RepoResult<i64> {
        Ok(self.sum_duration_ms(query).await? / 1000)
    }
}
