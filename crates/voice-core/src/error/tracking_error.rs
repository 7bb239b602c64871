//! Tracking-state faults
//!
//! Raised by the presence state machine when a transition arrives for a key in an
//! unexpected state. They are logged and dropped by the caller, never propagated.

use thiserror::Error;

use crate::entities::PresenceKey;
use crate::value_objects::Snowflake;

/// Transition received for a key in an unexpected state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingStateError {
    #[error("{key} joined channel {channel_id} while already tracked in channel {active_channel_id}")]
    AlreadyTracked {
        key: PresenceKey,
        channel_id: Snowflake,
        active_channel_id: Snowflake,
    },

    #[error("{key} left channel {channel_id} without a tracked session")]
    LeaveWithoutSession {
        key: PresenceKey,
        channel_id: Snowflake,
    },

    #[error("{key} moved into channel {channel_id} without a tracked session")]
    MoveWithoutSession {
        key: PresenceKey,
        channel_id: Snowflake,
    },

    #[error("{key} sent a voice-state update with out-of-range timestamp {timestamp}")]
    TimestampOutOfRange { key: PresenceKey, timestamp: i64 },

    #[error("{key} session started at {started_at} cannot end at {ended_at}")]
    EmptyInterval {
        key: PresenceKey,
        started_at: i64,
        ended_at: i64,
    },
}

impl TrackingStateError {
    /// Key the fault was raised for
    pub fn key(&self) -> PresenceKey {
        match self {
            Self::AlreadyTracked { key, .. }
            | Self::LeaveWithoutSession { key, .. }
            | Self::MoveWithoutSession { key, .. }
            | Self::TimestampOutOfRange { key, .. }
            | Self::EmptyInterval { key, .. } => *key,
        }
    }
}
