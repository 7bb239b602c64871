//! Session record database model

use sqlx::FromRow;

/// Database model for the voice_records table
///
/// Identifiers are stored as decimal strings; `channel_id` is NULL for rows written
/// before channels were recorded.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecordModel {
    pub user_id: String,
    pub guild_id: String,
    pub channel_id: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
}
