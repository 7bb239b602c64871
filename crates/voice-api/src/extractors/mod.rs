//! Axum extractors for request handling
//!
//! Custom extractors for path parameters, JSON bodies and query strings.

mod json;
mod path;

pub use json::{JsonBody, QueryParams};
pub use path::MemberPath;
