//! Integration test utilities for the voice time tracker
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API backed by an in-memory session log.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
