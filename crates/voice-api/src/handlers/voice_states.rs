//! Voice-state handlers
//!
//! Endpoints through which the presence source delivers transitions.

use axum::{extract::State, Json};
use voice_core::VoiceStateUpdate;
use voice_service::dto::{SnapshotRequest, SnapshotResponse};

use crate::extractors::JsonBody;
use crate::response::{Accepted, ApiResult};
use crate::state::AppState;

/// Submit a voice-state transition
///
/// POST /voice-states
///
/// Returns once the transition is queued for the dispatcher.
pub async fn submit_voice_state(
    State(state): State<AppState>,
    JsonBody(update): JsonBody<VoiceStateUpdate>,
) -> ApiResult<Accepted> {
    state.presence().submit(update).await?;
    Ok(Accepted)
}

/// Reconcile members already in voice channels
///
/// POST /voice-states/snapshot
pub async fn submit_snapshot(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SnapshotRequest>,
) -> ApiResult<Json<SnapshotResponse>> {
    let tracked = state.presence().reconcile(request.occupants).await?;
    Ok(Json(SnapshotResponse { tracked }))
}
