//! Integration tests for voice-db
//!
//! Every test runs against its own in-memory SQLite database, so no external
//! services are required:
//!
//! ```bash
//! cargo test -p voice-db --test integration_tests
//! ```

use voice_core::entities::{PresenceKey, SessionRecord};
use voice_core::traits::{SessionQuery, SessionRepository};
use voice_core::value_objects::Snowflake;
use voice_db::{
    create_pool, run_migrations, DatabaseConfig, MigrationOutcome, SqlitePool,
    SqliteSessionRepository,
};

const GUILD: Snowflake = Snowflake::new(1_000);
const USER: Snowflake = Snowflake::new(2_000);
const CHANNEL_A: Snowflake = Snowflake::new(30);
const CHANNEL_B: Snowflake = Snowflake::new(31);

/// Helper to create a fresh, unmigrated in-memory pool
async fn get_test_pool() -> SqlitePool {
    create_pool(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database")
}

/// Helper to create a migrated repository
async fn get_test_repo() -> SqliteSessionRepository {
    let pool = get_test_pool().await;
    run_migrations(&pool).await.expect("Migration failed");
    SqliteSessionRepository::new(pool)
}

fn key() -> PresenceKey {
    PresenceKey::new(GUILD, USER)
}

fn record(channel: Snowflake, start: i64, end: i64) -> SessionRecord {
    SessionRecord {
        user_id: USER,
        guild_id: GUILD,
        channel_id: Some(channel),
        started_at: start,
        ended_at: end,
    }
}

// ============================================================================
// Migration Tests
// ============================================================================

#[tokio::test]
async fn test_migration_is_idempotent() {
    let pool = get_test_pool().await;

    let first = run_migrations(&pool).await.unwrap();
    assert_eq!(
        first,
        MigrationOutcome::Applied(vec!["create_table", "create_member_index"])
    );

    let second = run_migrations(&pool).await.unwrap();
    assert_eq!(second, MigrationOutcome::AlreadyApplied);

    let third = run_migrations(&pool).await.unwrap();
    assert_eq!(third, MigrationOutcome::AlreadyApplied);
}

#[tokio::test]
async fn test_migration_adds_channel_column_to_legacy_table() {
    let pool = get_test_pool().await;

    // Schema written by the first release, before channels were recorded
    sqlx::query(
        "CREATE TABLE voice_records (user_id TEXT, guild_id TEXT, start_ts INTEGER, end_ts INTEGER)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO voice_records (user_id, guild_id, start_ts, end_ts) VALUES ('2000', '1000', 0, 40000)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let outcome = run_migrations(&pool).await.unwrap();
    assert_eq!(
        outcome,
        MigrationOutcome::Applied(vec!["add_channel_id", "create_member_index"])
    );
    assert_eq!(
        run_migrations(&pool).await.unwrap(),
        MigrationOutcome::AlreadyApplied
    );

    let repo = SqliteSessionRepository::new(pool);
    repo.append(&record(CHANNEL_A, 50_000, 60_000)).await.unwrap();

    // Legacy row counts toward the unfiltered total only
    let all = SessionQuery::for_key(key());
    assert_eq!(repo.sum_duration(&all).await.unwrap(), 50);
    assert_eq!(
        repo.sum_duration(&all.channel(Some(CHANNEL_A))).await.unwrap(),
        10
    );

    let stored = repo.find_by_key(key()).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].channel_id, None);
    assert_eq!(stored[1].channel_id, Some(CHANNEL_A));
}

// ============================================================================
// Session Repository Tests
// ============================================================================

#[tokio::test]
async fn test_sum_is_zero_without_records() {
    let repo = get_test_repo().await;
    let query = SessionQuery::for_key(key());

    assert_eq!(repo.sum_duration(&query).await.unwrap(), 0);
    assert_eq!(
        repo.sum_duration(&query.channel(Some(CHANNEL_A))).await.unwrap(),
        0
    );
    assert_eq!(repo.count(key()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_append_and_sum_by_channel() {
    let repo = get_test_repo().await;

    repo.append(&record(CHANNEL_A, 0, 100_000)).await.unwrap();
    repo.append(&record(CHANNEL_B, 100_000, 250_000)).await.unwrap();

    let query = SessionQuery::for_key(key());
    assert_eq!(repo.sum_duration(&query).await.unwrap(), 250);
    assert_eq!(
        repo.sum_duration(&query.channel(Some(CHANNEL_A))).await.unwrap(),
        100
    );
    assert_eq!(
        repo.sum_duration(&query.channel(Some(CHANNEL_B))).await.unwrap(),
        150
    );
    assert_eq!(repo.count(key()).await.unwrap(), 2);

    let stored = repo.find_by_key(key()).await.unwrap();
    assert_eq!(
        stored,
        vec![record(CHANNEL_A, 0, 100_000), record(CHANNEL_B, 100_000, 250_000)]
    );
}

#[tokio::test]
async fn test_since_filter_is_inclusive() {
    let repo = get_test_repo().await;

    repo.append(&record(CHANNEL_A, 1_000, 2_000)).await.unwrap();
    repo.append(&record(CHANNEL_A, 5_000, 9_000)).await.unwrap();

    let query = SessionQuery::for_key(key());
    assert_eq!(repo.sum_duration_ms(&query.since(5_000)).await.unwrap(), 4_000);
    assert_eq!(repo.sum_duration_ms(&query.since(5_001)).await.unwrap(), 0);
    assert_eq!(repo.sum_duration_ms(&query.since(0)).await.unwrap(), 5_000);
}

#[tokio::test]
async fn test_sums_are_scoped_per_guild_and_user() {
    let repo = get_test_repo().await;
    let other_guild = Snowflake::new(1_001);
    let other_user = Snowflake::new(2_001);

    repo.append(&record(CHANNEL_A, 0, 10_000)).await.unwrap();
    repo.append(&SessionRecord {
        guild_id: other_guild,
        ..record(CHANNEL_A, 0, 70_000)
    })
    .await
    .unwrap();
    repo.append(&SessionRecord {
        user_id: other_user,
        ..record(CHANNEL_A, 0, 90_000)
    })
    .await
    .unwrap();

    assert_eq!(
        repo.sum_duration(&SessionQuery::for_key(key())).await.unwrap(),
        10
    );
    assert_eq!(
        repo.sum_duration(&SessionQuery::new(USER, other_guild))
            .await
            .unwrap(),
        70
    );
    assert_eq!(
        repo.sum_duration(&SessionQuery::new(other_user, GUILD))
            .await
            .unwrap(),
        90
    );
}

#[tokio::test]
async fn test_append_is_not_deduplicated() {
    let repo = get_test_repo().await;
    let rec = record(CHANNEL_A, 0, 3_000);

    repo.append(&rec).await.unwrap();
    repo.append(&rec).await.unwrap();

    assert_eq!(repo.count(key()).await.unwrap(), 2);
    assert_eq!(
        repo.sum_duration(&SessionQuery::for_key(key())).await.unwrap(),
        6
    );
}

#[tokio::test]
async fn test_append_fails_without_schema() {
    // No migration: the table does not exist
    let repo = SqliteSessionRepository::new(get_test_pool().await);

    let err = repo.append(&record(CHANNEL_A, 0, 1_000)).await.unwrap_err();
    assert_eq!(err.code(), "DATABASE_ERROR");
}

#[tokio::test]
async fn test_records_survive_reopening_the_file() {
    let path = std::env::temp_dir().join(format!(
        "voicetime-test-{}-{}.db",
        std::process::id(),
        USER.into_inner()
    ));
    let _ = std::fs::remove_file(&path);
    let config = DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        ..Default::default()
    };

    {
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteSessionRepository::new(pool.clone())
            .append(&record(CHANNEL_A, 0, 42_000))
            .await
            .unwrap();
        pool.close().await;
    }

    let pool = create_pool(&config).await.unwrap();
    assert_eq!(
        run_migrations(&pool).await.unwrap(),
        MigrationOutcome::AlreadyApplied
    );
    let repo = SqliteSessionRepository::new(pool.clone());
    assert_eq!(
        repo.sum_duration(&SessionQuery::for_key(key())).await.unwrap(),
        42
    );
    pool.close().await;

    let _ = std::fs::remove_file(&path);
}
