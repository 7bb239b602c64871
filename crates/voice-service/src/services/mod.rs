//! Application services
//!
//! - [`PresenceTracker`]: in-memory presence state machine
//! - [`QueryEngine`]: voice-time totals over live and stored state
//! - [`PresenceDispatcher`]: actor serializing every transition and query

mod dispatcher;
mod error;
mod query;
mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::{DispatcherError, PresenceDispatcher, PresenceHandle};
pub use error::{ServiceError, ServiceResult};
pub use query::{DebugSnapshot, QueryEngine, TotalOutcome, VoiceTotal};
pub use tracker::{transition, PresenceTracker, TransitionOutcome};
