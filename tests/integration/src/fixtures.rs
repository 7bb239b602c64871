//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};

/// Counter for unique member ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Fixed base timestamp (2023-11-14T22:13:20Z) in Unix milliseconds
pub const T0: i64 = 1_700_000_000_000;

pub const GUILD: i64 = 100_000_000_000_000_001;
pub const CHANNEL_A: i64 = 200_000_000_000_000_001;
pub const CHANNEL_B: i64 = 200_000_000_000_000_002;

/// A user id no other test uses
pub fn unique_user() -> i64 {
    300_000_000_000_000_000 + COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Voice-state update body; ids are sent as strings the way the gateway delivers them
pub fn voice_state(user: i64, previous: Option<i64>, new: Option<i64>, timestamp: i64) -> Value {
    json!({
        "guild_id": GUILD.to_string(),
        "user_id": user.to_string(),
        "previous_channel_id": previous.map(|id| id.to_string()),
        "new_channel_id": new.map(|id| id.to_string()),
        "timestamp": timestamp,
    })
}

/// Snapshot body listing members already in voice
pub fn snapshot(occupants: &[(i64, i64)]) -> Value {
    let occupants: Vec<Value> = occupants
        .iter()
        .map(|(user, channel)| {
            json!({
                "guild_id": GUILD.to_string(),
                "user_id": user.to_string(),
                "channel_id": channel.to_string(),
            })
        })
        .collect();
    json!({ "occupants": occupants })
}

/// Path prefix for one member's endpoints
pub fn member_path(user: i64) -> String {
    format!("/api/v1/guilds/{GUILD}/members/{user}")
}

/// Voice time response
#[derive(Debug, Deserialize)]
pub struct VoiceTimeResponse {
    pub period: String,
    pub label: String,
    pub seconds: i64,
    pub display: String,
    pub channel_id: Option<String>,
    pub channel_ignored: bool,
}

/// Stored total response
#[derive(Debug, Deserialize)]
pub struct VoiceTotalResponse {
    pub seconds: i64,
    pub display: String,
    pub since: i64,
    pub channel_id: Option<String>,
}

/// Live session response
#[derive(Debug, Deserialize)]
pub struct VoiceSessionResponse {
    pub channel_id: String,
    pub started_at: i64,
    pub elapsed_seconds: i64,
    pub display: String,
}

/// Diagnostic response
#[derive(Debug, Deserialize)]
pub struct VoiceDebugResponse {
    pub tracked: bool,
    pub current_session_seconds: Option<i64>,
    pub total_seconds: i64,
    pub total_display: String,
    pub record_count: i64,
}

/// Snapshot response
#[derive(Debug, Deserialize)]
pub struct SnapshotResponse {
    pub tracked: usize,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Readiness response
#[derive(Debug, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Deserialize)]
pub struct ReadinessChecks {
    pub database: String,
    pub dispatcher: String,
}
