//! Route handlers
//!
//! All HTTP request handlers organized by concern.

pub mod health;
pub mod voice_states;
pub mod voice_time;
