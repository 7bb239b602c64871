//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting service outcomes to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use mappers::format_duration;
pub use requests::{SnapshotRequest, VoiceTimeParams, VoiceTotalParams};
pub use responses::{
    HealthChecks, HealthResponse, ReadinessResponse, SnapshotResponse, VoiceDebugResponse,
    VoiceSessionResponse, VoiceTimeResponse, VoiceTotalResponse,
};
