//! API Integration Tests
//!
//! Each test starts its own server over an in-memory SQLite session log.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let ready: ReadinessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ready.status, "ready");
    assert_eq!(ready.checks.database, "healthy");
    assert_eq!(ready.checks.dispatcher, "running");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Voice-State Tests
// ============================================================================

#[tokio::test]
async fn test_join_move_leave_totals() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();

    server
        .submit(&voice_state(user, None, Some(CHANNEL_A), T0))
        .await
        .unwrap();
    server
        .submit(&voice_state(user, Some(CHANNEL_A), Some(CHANNEL_B), T0 + 100_000))
        .await
        .unwrap();
    server
        .submit(&voice_state(user, Some(CHANNEL_B), None, T0 + 250_000))
        .await
        .unwrap();

    let base = member_path(user);

    let response = server.get(&format!("{base}/voice-time/total")).await.unwrap();
    let total: VoiceTotalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(total.seconds, 250);
    assert_eq!(total.display, "0h 4m 10s");
    assert_eq!(total.since, 0);
    assert!(total.channel_id.is_none());

    let response = server
        .get(&format!("{base}/voice-time/total?channel_id={CHANNEL_A}"))
        .await
        .unwrap();
    let total: VoiceTotalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(total.seconds, 100);
    assert_eq!(total.channel_id.as_deref(), Some(CHANNEL_A.to_string().as_str()));

    let response = server
        .get(&format!("{base}/voice-time/total?channel_id={CHANNEL_B}"))
        .await
        .unwrap();
    let total: VoiceTotalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(total.seconds, 150);

    let response = server
        .get(&format!("{base}/voice-time?period=all"))
        .await
        .unwrap();
    let time: VoiceTimeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(time.period, "all");
    assert_eq!(time.label, "Overall");
    assert_eq!(time.seconds, 250);
    assert!(!time.channel_ignored);

    let response = server
        .get(&format!("{base}/voice-time/total?since={}", T0 + 100_000))
        .await
        .unwrap();
    let total: VoiceTotalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(total.seconds, 150);
}

#[tokio::test]
async fn test_live_session_and_current_period() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();
    let base = member_path(user);

    server
        .submit(&voice_state(user, None, Some(CHANNEL_A), T0))
        .await
        .unwrap();

    let response = server.get(&format!("{base}/voice-session")).await.unwrap();
    let session: VoiceSessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(session.channel_id, CHANNEL_A.to_string());
    assert_eq!(session.started_at, T0);
    assert!(session.elapsed_seconds > 0);
    assert!(!session.display.is_empty());

    // The channel filter does not apply to the live session, but is flagged
    let response = server
        .get(&format!("{base}/voice-time?period=current&channel_id={CHANNEL_B}"))
        .await
        .unwrap();
    let time: VoiceTimeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(time.period, "current");
    assert!(time.seconds > 0);
    assert!(time.channel_ignored);
    assert_eq!(time.channel_id.as_deref(), Some(CHANNEL_A.to_string().as_str()));

    // Nothing is stored while the session is open
    let response = server.get(&format!("{base}/voice-time/total")).await.unwrap();
    let total: VoiceTotalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(total.seconds, 0);
}

#[tokio::test]
async fn test_current_period_not_tracked() {
    let server = TestServer::start().await.expect("Failed to start server");
    let base = member_path(unique_user());

    let response = server
        .get(&format!("{base}/voice-time?period=current"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "NOT_TRACKED");

    let response = server.get(&format!("{base}/voice-session")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_leave_without_session_is_ignored() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();

    server
        .submit(&voice_state(user, Some(CHANNEL_A), None, T0 + 5_000))
        .await
        .unwrap();

    let response = server.get(&format!("{}/voice-debug", member_path(user))).await.unwrap();
    let debug: VoiceDebugResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!debug.tracked);
    assert!(debug.current_session_seconds.is_none());
    assert_eq!(debug.total_seconds, 0);
    assert_eq!(debug.record_count, 0);
}

#[tokio::test]
async fn test_snapshot_tracks_occupants() {
    let server = TestServer::start().await.expect("Failed to start server");
    let first = unique_user();
    let second = unique_user();

    let response = server
        .post(
            "/api/v1/voice-states/snapshot",
            &snapshot(&[(first, CHANNEL_A), (second, CHANNEL_B)]),
        )
        .await
        .unwrap();
    let result: SnapshotResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.tracked, 2);

    // A repeated snapshot leaves existing sessions alone
    let response = server
        .post("/api/v1/voice-states/snapshot", &snapshot(&[(first, CHANNEL_B)]))
        .await
        .unwrap();
    let result: SnapshotResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.tracked, 0);

    let response = server
        .get(&format!("{}/voice-session", member_path(first)))
        .await
        .unwrap();
    let session: VoiceSessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(session.channel_id, CHANNEL_A.to_string());
}

#[tokio::test]
async fn test_debug_view() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_user();

    server
        .submit(&voice_state(user, None, Some(CHANNEL_A), T0))
        .await
        .unwrap();
    server
        .submit(&voice_state(user, Some(CHANNEL_A), None, T0 + 61_000))
        .await
        .unwrap();
    server
        .submit(&voice_state(user, None, Some(CHANNEL_B), T0 + 120_000))
        .await
        .unwrap();

    let response = server.get(&format!("{}/voice-debug", member_path(user))).await.unwrap();
    let debug: VoiceDebugResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(debug.tracked);
    assert!(debug.current_session_seconds.is_some());
    assert_eq!(debug.total_seconds, 61);
    assert_eq!(debug.total_display, "0h 1m 1s");
    assert_eq!(debug.record_count, 1);
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_period() {
    let server = TestServer::start().await.expect("Failed to start server");
    let base = member_path(unique_user());

    let response = server
        .get(&format!("{base}/voice-time?period=fortnight"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get(&format!("{base}/voice-time")).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_invalid_snowflake_in_path() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/guilds/not-a-number/members/1/voice-time?period=all")
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");
    assert!(error.error.message.contains("guild_id"));
}

#[tokio::test]
async fn test_non_positive_snowflake_in_path() {
    let server = TestServer::start().await.expect("Failed to start server");

    for path in [
        "/api/v1/guilds/-5/members/1/voice-time?period=all",
        "/api/v1/guilds/1/members/0/voice-session",
    ] {
        let response = server.get(path).await.unwrap();
        let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");
    }
}

#[tokio::test]
async fn test_negative_snowflake_in_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_raw(
            "/api/v1/voice-states",
            r#"{"guild_id":"-5","user_id":"1","previous_channel_id":null,"new_channel_id":"3","timestamp":1000}"#,
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_BODY");
}

#[tokio::test]
async fn test_negative_since_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get(&format!("{}/voice-time/total?since=-1", member_path(unique_user())))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_malformed_voice_state_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_raw("/api/v1/voice-states", r#"{"guild_id": "1"}"#)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_BODY");
}
