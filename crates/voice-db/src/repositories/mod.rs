//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in voice-core.

mod error;
mod session;

pub use session::SqliteSessionRepository;
