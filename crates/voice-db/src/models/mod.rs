//! Database models - SQLx-compatible structs for SQLite tables

mod session_record;

pub use session_record::SessionRecordModel;
