//! Voice-time handlers
//!
//! Endpoints for the command layer: period totals, raw stored totals, the live session
//! and a diagnostic view.

use axum::{extract::State, Json};
use chrono::Utc;
use voice_core::DomainError;
use voice_service::dto::{
    format_duration, VoiceDebugResponse, VoiceSessionResponse, VoiceTimeParams,
    VoiceTimeResponse, VoiceTotalParams, VoiceTotalResponse,
};

use crate::extractors::{MemberPath, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// Voice time for a period
///
/// GET /guilds/{guild_id}/members/{user_id}/voice-time?period=&channel_id=
pub async fn get_voice_time(
    State(state): State<AppState>,
    member: MemberPath,
    QueryParams(params): QueryParams<VoiceTimeParams>,
) -> ApiResult<Json<VoiceTimeResponse>> {
    let period = params.period()?;
    let channel_id = params.channel_id()?;

    let outcome = state
        .presence()
        .compute_total(member.user_id, member.guild_id, period, channel_id)
        .await?;

    Ok(Json(VoiceTimeResponse::try_from(outcome)?))
}

/// Stored voice time since a timestamp
///
/// GET /guilds/{guild_id}/members/{user_id}/voice-time/total?since=&channel_id=
pub async fn get_voice_total(
    State(state): State<AppState>,
    member: MemberPath,
    QueryParams(params): QueryParams<VoiceTotalParams>,
) -> ApiResult<Json<VoiceTotalResponse>> {
    let since = params.since()?;
    let channel_id = params.channel_id()?;

    let presence = state.presence();
    let seconds = match channel_id {
        Some(channel_id) => {
            presence
                .get_total_by_channel(member.user_id, member.guild_id, channel_id, since)
                .await?
        }
        None => {
            presence
                .get_total(member.user_id, member.guild_id, since)
                .await?
        }
    };

    Ok(Json(VoiceTotalResponse {
        seconds,
        display: format_duration(seconds),
        since,
        channel_id,
    }))
}

/// Live voice session
///
/// GET /guilds/{guild_id}/members/{user_id}/voice-session
pub async fn get_voice_session(
    State(state): State<AppState>,
    member: MemberPath,
) -> ApiResult<Json<VoiceSessionResponse>> {
    let session = state
        .presence()
        .get_active_session(member.guild_id, member.user_id)
        .await?
        .ok_or(DomainError::NotTracked {
            guild_id: member.guild_id,
            user_id: member.user_id,
        })?;

    Ok(Json(VoiceSessionResponse::at(
        session,
        Utc::now().timestamp_millis(),
    )))
}

/// Diagnostic view of a member
///
/// GET /guilds/{guild_id}/members/{user_id}/voice-debug
pub async fn get_voice_debug(
    State(state): State<AppState>,
    member: MemberPath,
) -> ApiResult<Json<VoiceDebugResponse>> {
    let snapshot = state
        .presence()
        .debug_snapshot(member.guild_id, member.user_id)
        .await?;

    Ok(Json(VoiceDebugResponse::from(snapshot)))
}
