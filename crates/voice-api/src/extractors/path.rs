//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use voice_core::{PresenceKey, Snowflake};

use crate::response::ApiError;

/// Raw path parameters with guild_id and user_id
#[derive(Debug, Deserialize)]
struct RawMemberPath {
    guild_id: String,
    user_id: String,
}

/// Validated `/guilds/:guild_id/members/:user_id` path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPath {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
}

impl MemberPath {
    /// Presence key of the member
    pub fn key(&self) -> PresenceKey {
        PresenceKey::new(self.guild_id, self.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MemberPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawMemberPath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(Self {
            guild_id: parse_snowflake("guild_id", &raw.guild_id)?,
            user_id: parse_snowflake("user_id", &raw.user_id)?,
        })
    }
}

fn parse_snowflake(name: &str, raw: &str) -> Result<Snowflake, ApiError> {
    Snowflake::parse(raw).map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}
