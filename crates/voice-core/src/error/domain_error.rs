//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{PeriodParseError, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User {user_id} is not in a tracked voice session in guild {guild_id}")]
    NotTracked {
        guild_id: Snowflake,
        user_id: Snowflake,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodParseError),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotTracked { .. } => "NOT_TRACKED",
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotTracked { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidPeriod(_))
    }
}
