//! Route definitions
//!
//! API routes mounted under /api/v1, health checks at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, voice_states, voice_time};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(voice_state_routes())
        .merge(voice_time_routes())
}

/// Presence source routes
fn voice_state_routes() -> Router<AppState> {
    Router::new()
        .route("/voice-states", post(voice_states::submit_voice_state))
        .route("/voice-states/snapshot", post(voice_states::submit_snapshot))
}

/// Voice-time query routes
fn voice_time_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guilds/:guild_id/members/:user_id/voice-time",
            get(voice_time::get_voice_time),
        )
        .route(
            "/guilds/:guild_id/members/:user_id/voice-time/total",
            get(voice_time::get_voice_total),
        )
        .route(
            "/guilds/:guild_id/members/:user_id/voice-session",
            get(voice_time::get_voice_session),
        )
        .route(
            "/guilds/:guild_id/members/:user_id/voice-debug",
            get(voice_time::get_voice_debug),
        )
}
