//! Voice-time query engine
//!
//! Answers totals from two sources: the tracker's live state for the `current` period,
//! and the session store for every calendar period. Queries never mutate either.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::{error, instrument};
use voice_core::{DomainError, Period, PresenceKey, SessionQuery, SessionRepository, Snowflake};

use super::tracker::PresenceTracker;

/// Total time for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTotal {
    /// Whole seconds
    Seconds(i64),
    /// `current` was asked for a key without a live session
    NotTracked,
}

impl VoiceTotal {
    /// Seconds, or `None` when not tracked
    pub fn seconds(self) -> Option<i64> {
        match self {
            Self::Seconds(seconds) => Some(seconds),
            Self::NotTracked => None,
        }
    }
}

/// Answer to a period query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalOutcome {
    pub key: PresenceKey,
    pub period: Period,
    pub total: VoiceTotal,
    /// Live session channel for `current`, the requested filter otherwise
    pub channel_id: Option<Snowflake>,
    /// A channel filter was supplied but `current` does not apply it
    pub channel_ignored: bool,
}

impl TotalOutcome {
    /// Seconds, turning `NotTracked` into a domain error
    pub fn into_seconds(self) -> Result<i64, DomainError> {
        self.total.seconds().ok_or(DomainError::NotTracked {
            guild_id: self.key.guild_id,
            user_id: self.key.user_id,
        })
    }
}

/// Diagnostic view of one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugSnapshot {
    pub tracked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_session_seconds: Option<i64>,
    pub total_seconds: i64,
    pub record_count: i64,
}

/// Read-only query engine over the tracker and the session store
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn SessionRepository>,
}

impl QueryEngine {
    /// Create a new QueryEngine
    pub fn new(store: Arc<dyn SessionRepository>) -> Self {
        Self { store }
    }

    /// Total for a period, with calendar boundaries in the local time zone
    pub async fn compute_total(
        &self,
        tracker: &PresenceTracker,
        key: PresenceKey,
        period: Period,
        channel_id: Option<Snowflake>,
    ) -> TotalOutcome {
        self.compute_total_at(tracker, key, period, channel_id, &Local::now())
            .await
    }

    /// Total for a period as seen at `now`, with calendar boundaries in `now`'s zone
    #[instrument(skip(self, tracker, now))]
    pub async fn compute_total_at<Tz: TimeZone>(
        &self,
        tracker: &PresenceTracker,
        key: PresenceKey,
        period: Period,
        channel_id: Option<Snowflake>,
        now: &DateTime<Tz>,
    ) -> TotalOutcome {
        let now_ms = now.timestamp_millis();
        let Some(since) = period.lower_bound(now) else {
            return Self::current_session(tracker, key, channel_id, now_ms);
        };

        let query = SessionQuery::for_key(key).since(since).channel(channel_id);
        TotalOutcome {
            key,
            period,
            total: VoiceTotal::Seconds(self.sum_seconds(&query).await),
            channel_id,
            channel_ignored: false,
        }
    }

    /// Elapsed time of the live session at `now_ms`
    ///
    /// The channel filter is not applied; the outcome reports whether one was given.
    pub fn current_session(
        tracker: &PresenceTracker,
        key: PresenceKey,
        channel_filter: Option<Snowflake>,
        now_ms: i64,
    ) -> TotalOutcome {
        let active = tracker.active_session(key);

        TotalOutcome {
            key,
            period: Period::Current,
            total: active.map_or(VoiceTotal::NotTracked, |session| {
                VoiceTotal::Seconds(session.elapsed_ms(now_ms) / 1000)
            }),
            channel_id: active.map(|session| session.channel_id),
            channel_ignored: channel_filter.is_some(),
        }
    }

    /// Stored seconds for a user in a guild since `since` (unix milliseconds)
    pub async fn get_total(&self, user_id: Snowflake, guild_id: Snowflake, since: i64) -> i64 {
        self.sum_seconds(&SessionQuery::new(user_id, guild_id).since(since))
            .await
    }

    /// Stored seconds for a user in one channel of a guild since `since`
    pub async fn get_total_by_channel(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
        channel_id: Snowflake,
        since: i64,
    ) -> i64 {
        let query = SessionQuery::new(user_id, guild_id)
            .since(since)
            .channel(Some(channel_id));
        self.sum_seconds(&query).await
    }

    /// Diagnostic view: live state, all-time total and stored record count
    #[instrument(skip(self, tracker))]
    pub async fn debug_snapshot(
        &self,
        tracker: &PresenceTracker,
        key: PresenceKey,
        now_ms: i64,
    ) -> DebugSnapshot {
        let active = tracker.active_session(key);
        let total_seconds = self.sum_seconds(&SessionQuery::for_key(key)).await;
        let record_count = match self.store.count(key).await {
            Ok(count) => count,
            Err(e) => {
                error!(key = %key, error = %e, "Failed to count session records");
                0
            }
        };

        DebugSnapshot {
            tracked: active.is_some(),
            current_session_seconds: active.map(|session| session.elapsed_ms(now_ms) / 1000),
            total_seconds,
            record_count,
        }
    }

    /// Stored sum in seconds; storage failures are logged and read as zero
    async fn sum_seconds(&self, query: &SessionQuery) -> i64 {
        match self.store.sum_duration(query).await {
            Ok(seconds) => seconds,
            Err(e) => {
                error!(
                    user_id = %query.user_id,
                    guild_id = %query.guild_id,
                    since = query.since,
                    error = %e,
                    "Failed to sum voice time"
                );
                0
            }
        }
    }
}
