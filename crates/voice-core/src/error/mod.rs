//! Domain errors

mod domain_error;
mod tracking_error;

pub use domain_error::DomainError;
pub use tracking_error::TrackingStateError;
