//! Entity to model mappers
//!
//! This module provides conversions between domain entities (voice-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod session_record;

pub use session_record::SessionRecordInsert;
