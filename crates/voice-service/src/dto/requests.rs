//! Request DTOs for API endpoints
//!
//! Query strings arrive as raw strings and are parsed by the handlers so that a bad value
//! produces the API's own validation error instead of an extractor rejection.

use serde::Deserialize;
use voice_core::{DomainError, Period, Snowflake, VoiceOccupant};

use crate::services::ServiceError;

/// Startup snapshot of members already in voice channels
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRequest {
    #[serde(default)]
    pub occupants: Vec<VoiceOccupant>,
}

/// `?period=&channel_id=` for period totals
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceTimeParams {
    pub period: Option<String>,
    pub channel_id: Option<String>,
}

impl VoiceTimeParams {
    /// Required, case-insensitive period name
    pub fn period(&self) -> Result<Period, ServiceError> {
        let raw = self
            .period
            .as_deref()
            .ok_or_else(|| ServiceError::validation("period is required"))?;
        Ok(raw.parse::<Period>().map_err(DomainError::from)?)
    }

    /// Optional channel filter
    pub fn channel_id(&self) -> Result<Option<Snowflake>, ServiceError> {
        parse_channel(self.channel_id.as_deref())
    }
}

/// `?since=&channel_id=` for raw stored totals
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceTotalParams {
    pub since: Option<String>,
    pub channel_id: Option<String>,
}

impl VoiceTotalParams {
    /// Lower bound in unix milliseconds, 0 when absent
    pub fn since(&self) -> Result<i64, ServiceError> {
        match self.since.as_deref().map(str::trim) {
            None | Some("") => Ok(0),
            Some(raw) => match raw.parse::<i64>() {
                Ok(since) if since >= 0 => Ok(since),
                _ => Err(ServiceError::validation(format!(
                    "since must be a non-negative unix timestamp in milliseconds, got '{raw}'"
                ))),
            },
        }
    }

    /// Optional channel filter
    pub fn channel_id(&self) -> Result<Option<Snowflake>, ServiceError> {
        parse_channel(self.channel_id.as_deref())
    }
}

fn parse_channel(raw: Option<&str>) -> Result<Option<Snowflake>, ServiceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Snowflake::parse(raw)
            .map(Some)
            .map_err(|_| ServiceError::validation(format!("invalid channel_id '{raw}'"))),
    }
}
