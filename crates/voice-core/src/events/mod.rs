//! Events consumed from the presence source

mod voice_state;

pub use voice_state::{
    is_valid_timestamp, Transition, VoiceOccupant, VoiceStateUpdate, MAX_TIMESTAMP_MS,
};
