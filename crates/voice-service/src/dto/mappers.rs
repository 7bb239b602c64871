//! Outcome to DTO mappers
//!
//! Implements conversions from service outcomes to response DTOs.

use voice_core::{ActiveSession, DomainError};

use super::responses::{VoiceDebugResponse, VoiceSessionResponse, VoiceTimeResponse};
use crate::services::{DebugSnapshot, TotalOutcome};

/// Render whole seconds as `"{h}h {m}m {s}s"`
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{}h {}m {}s",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

impl TryFrom<TotalOutcome> for VoiceTimeResponse {
    type Error = DomainError;

    fn try_from(outcome: TotalOutcome) -> Result<Self, Self::Error> {
        let seconds = outcome.into_seconds()?;
        Ok(Self {
            period: outcome.period,
            label: outcome.period.label(),
            seconds,
            display: format_duration(seconds),
            channel_id: outcome.channel_id,
            channel_ignored: outcome.channel_ignored,
        })
    }
}

impl VoiceSessionResponse {
    /// Live session as seen at `now` (unix milliseconds)
    pub fn at(session: ActiveSession, now: i64) -> Self {
        let elapsed_seconds = session.elapsed_ms(now) / 1000;
        Self {
            channel_id: session.channel_id,
            started_at: session.started_at,
            elapsed_seconds,
            display: format_duration(elapsed_seconds),
        }
    }
}

impl From<DebugSnapshot> for VoiceDebugResponse {
    fn from(snapshot: DebugSnapshot) -> Self {
        Self {
            tracked: snapshot.tracked,
            current_session_seconds: snapshot.current_session_seconds,
            total_seconds: snapshot.total_seconds,
            total_display: format_duration(snapshot.total_seconds),
            record_count: snapshot.record_count,
        }
    }
}
