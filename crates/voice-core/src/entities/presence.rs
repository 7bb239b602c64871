//! Presence entities - live voice occupancy tracked in memory

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Identity of a trackable presence: one user within one guild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresenceKey {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
}

impl PresenceKey {
    /// Create a new PresenceKey
    #[inline]
    pub const fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self { guild_id, user_id }
    }
}

impl fmt::Display for PresenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.guild_id, self.user_id)
    }
}

/// An ongoing voice-channel occupancy
///
/// Exists only while the user sits in some voice channel of the guild. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub channel_id: Snowflake,
    /// Unix milliseconds
    pub started_at: i64,
}

impl ActiveSession {
    /// Create a new ActiveSession
    pub const fn new(channel_id: Snowflake, started_at: i64) -> Self {
        Self {
            channel_id,
            started_at,
        }
    }

    /// Milliseconds elapsed at `now`, clamped at zero
    #[inline]
    pub fn elapsed_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.started_at).max(0)
    }
}
