//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use voice_core::{Period, Snowflake};

// ============================================================================
// Voice Time Responses
// ============================================================================

/// Total for a named period
#[derive(Debug, Clone, Serialize)]
pub struct VoiceTimeResponse {
    pub period: Period,
    pub label: &'static str,
    pub seconds: i64,
    /// `"{h}h {m}m {s}s"`
    pub display: String,
    /// Live session channel for `current`, the requested filter otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    pub channel_ignored: bool,
}

/// Raw stored total since a timestamp
#[derive(Debug, Clone, Serialize)]
pub struct VoiceTotalResponse {
    pub seconds: i64,
    pub display: String,
    pub since: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
}

/// Live voice session
#[derive(Debug, Clone, Serialize)]
pub struct VoiceSessionResponse {
    pub channel_id: Snowflake,
    /// Unix milliseconds
    pub started_at: i64,
    pub elapsed_seconds: i64,
    pub display: String,
}

/// Diagnostic view of one member
#[derive(Debug, Clone, Serialize)]
pub struct VoiceDebugResponse {
    pub tracked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_session_seconds: Option<i64>,
    pub total_seconds: i64,
    pub total_display: String,
    pub record_count: i64,
}

/// Result of a startup snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    /// Occupants newly tracked
    pub tracked: usize,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub dispatcher: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, dispatcher_running: bool) -> Self {
        let all_healthy = database_healthy && dispatcher_running;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                dispatcher: if dispatcher_running { "running" } else { "stopped" }.to_string(),
            },
        }
    }

    /// Whether every dependency is healthy
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
