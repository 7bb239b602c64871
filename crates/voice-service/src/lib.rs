//! # voice-service
//!
//! Application layer: the presence state machine, the dispatcher actor that owns it,
//! the voice-time query engine, and the DTOs exchanged with the HTTP adapter.

pub mod dto;
pub mod services;

pub use dto::format_duration;
pub use services::{
    DebugSnapshot, DispatcherError, PresenceDispatcher, PresenceHandle, PresenceTracker,
    QueryEngine, ServiceError, ServiceResult, TotalOutcome, TransitionOutcome, VoiceTotal,
};
