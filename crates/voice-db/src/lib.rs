//! # voice-db
//!
//! Database layer implementing the session log with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides the SQLite implementation of the `SessionRepository` trait
//! defined in `voice-core`. It handles:
//!
//! - Connection pool management (WAL journal, configurable `synchronous`)
//! - The idempotent schema migration for the `voice_records` table
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - The repository implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voice_common::AppConfig;
//! use voice_db::{create_pool, run_migrations, DatabaseConfig, SqliteSessionRepository};
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     run_migrations(&pool).await?;
//!     let sessions = SqliteSessionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod migrate;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use migrate::{run_migrations, MigrationError, MigrationOutcome};
pub use pool::{create_pool, DatabaseConfig, SqlitePool};
pub use repositories::SqliteSessionRepository;
