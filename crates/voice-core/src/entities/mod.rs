//! Domain entities - core presence objects

mod presence;
mod session_record;

pub use presence::{ActiveSession, PresenceKey};
pub use session_record::SessionRecord;
