//! SessionRecord entity <-> model mapper

use voice_core::entities::SessionRecord;
use voice_core::error::DomainError;
use voice_core::value_objects::Snowflake;

use crate::models::SessionRecordModel;

fn parse_id(column: &str, raw: &str) -> Result<Snowflake, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::DatabaseError(format!("malformed {column} in voice_records: {raw:?}")))
}

/// Convert SessionRecordModel to SessionRecord entity
impl TryFrom<SessionRecordModel> for SessionRecord {
    type Error = DomainError;

    fn try_from(model: SessionRecordModel) -> Result<Self, Self::Error> {
        Ok(SessionRecord {
            user_id: parse_id("user_id", &model.user_id)?,
            guild_id: parse_id("guild_id", &model.guild_id)?,
            channel_id: model
                .channel_id
                .as_deref()
                .map(|raw| parse_id("channel_id", raw))
                .transpose()?,
            started_at: model.start_ts,
            ended_at: model.end_ts,
        })
    }
}

/// Convert SessionRecord entity reference to values for database insertion
pub struct SessionRecordInsert {
    pub user_id: String,
    pub guild_id: String,
    pub channel_id: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
}

impl SessionRecordInsert {
    pub fn new(record: &SessionRecord) -> Self {
        Self {
            user_id: record.user_id.to_string(),
            guild_id: record.guild_id.to_string(),
            channel_id: record.channel_id.map(|id| id.to_string()),
            start_ts: record.started_at,
            end_ts: record.ended_at,
        }
    }
}
