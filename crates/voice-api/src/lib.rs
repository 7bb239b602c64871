//! # voice-api
//!
//! HTTP adapter built with the Axum framework. A presence source posts voice-state
//! transitions here; a command layer reads voice-time totals back.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
