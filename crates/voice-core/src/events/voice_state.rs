//! Voice-state events
//!
//! The presence source reports every change of a member's voice channel as a
//! [`VoiceStateUpdate`]. At startup it may also report a snapshot of current occupants.

use serde::{Deserialize, Serialize};

use crate::entities::PresenceKey;
use crate::value_objects::Snowflake;

/// Latest accepted event time, 9999-12-31T23:59:59.999Z, in unix milliseconds
pub const MAX_TIMESTAMP_MS: i64 = 253_402_300_799_999;

/// Whether an event time lies between the epoch and [`MAX_TIMESTAMP_MS`]
#[inline]
pub fn is_valid_timestamp(timestamp: i64) -> bool {
    (0..=MAX_TIMESTAMP_MS).contains(&timestamp)
}

/// A member's voice channel changed (or was re-announced) in one guild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceStateUpdate {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    #[serde(default)]
    pub previous_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub new_channel_id: Option<Snowflake>,
    /// Unix milliseconds
    pub timestamp: i64,
}

/// Classified channel change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Join { channel_id: Snowflake },
    Leave { channel_id: Snowflake },
    Move { from: Snowflake, to: Snowflake },
    /// Same channel on both sides (mute, deafen, ...) or absent on both sides
    NoOp,
}

impl VoiceStateUpdate {
    /// Presence key of the member
    #[inline]
    pub fn key(&self) -> PresenceKey {
        PresenceKey::new(self.guild_id, self.user_id)
    }

    /// Classify the channel change
    pub fn transition(&self) -> Transition {
        match (self.previous_channel_id, self.new_channel_id) {
            (None, Some(channel_id)) => Transition::Join { channel_id },
            (Some(channel_id), None) => Transition::Leave { channel_id },
            (Some(from), Some(to)) if from != to => Transition::Move { from, to },
            _ => Transition::NoOp,
        }
    }
}

/// A member found sitting in a voice channel when tracking starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOccupant {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
}

impl VoiceOccupant {
    /// Presence key of the occupant
    #[inline]
    pub fn key(&self) -> PresenceKey {
        PresenceKey::new(self.guild_id, self.user_id)
    }
}
