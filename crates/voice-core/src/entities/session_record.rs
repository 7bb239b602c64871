//! Session record entity - one completed, durable occupancy interval

use serde::{Deserialize, Serialize};

use crate::entities::{ActiveSession, PresenceKey};
use crate::value_objects::Snowflake;

/// Completed voice-channel occupancy interval
///
/// `ended_at > started_at` holds for every record the tracker creates. `channel_id` is
/// `None` only for legacy rows written before channels were recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Option<Snowflake>,
    /// Unix milliseconds
    pub started_at: i64,
    /// Unix milliseconds
    pub ended_at: i64,
}

impl SessionRecord {
    /// Close an active session at `ended_at`.
    ///
    /// Returns `None` when the interval would be empty or negative.
    pub fn close(key: PresenceKey, session: &ActiveSession, ended_at: i64) -> Option<Self> {
        (ended_at > session.started_at).then(|| Self {
            user_id: key.user_id,
            guild_id: key.guild_id,
            channel_id: Some(session.channel_id),
            started_at: session.started_at,
            ended_at,
        })
    }

    /// Presence key this record belongs to
    #[inline]
    pub fn key(&self) -> PresenceKey {
        PresenceKey::new(self.guild_id, self.user_id)
    }

    /// Interval length in milliseconds
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.ended_at.saturating_sub(self.started_at)
    }

    /// Interval length in whole seconds
    #[inline]
    pub fn duration_secs(&self) -> i64 {
        self.duration_ms() / 1000
    }
}
