//! # voice-core
//!
//! Domain layer containing presence entities, value objects, repository traits, and the
//! voice-state events consumed from the presence source.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ActiveSession, PresenceKey, SessionRecord};
pub use error::{DomainError, TrackingStateError};
pub use events::{
    is_valid_timestamp, Transition, VoiceOccupant, VoiceStateUpdate, MAX_TIMESTAMP_MS,
};
pub use traits::{RepoResult, SessionQuery, SessionRepository};
pub use value_objects::{Period, PeriodParseError, Snowflake, SnowflakeParseError};
