//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::PlayerIdError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Player not found in cache: {0}")]
    PlayerNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid player id: {0}")]
    InvalidPlayerId(#[from] PlayerIdError),

    // =========================================================================
    // Remote Statistics API Errors
    // =========================================================================
    #[error("Remote stats API unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Remote stats API returned status {status}")]
    RemoteStatus { status: u16 },

    #[error("Malformed remote stats response: {0}")]
    MalformedRemoteResponse(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "UNKNOWN_PLAYER",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPlayerId(_) => "INVALID_PLAYER_ID",

            Self::RemoteUnavailable(_) => "REMOTE_UNAVAILABLE",
            Self::RemoteStatus { .. } => "REMOTE_STATUS",
            Self::MalformedRemoteResponse(_) => "MALFORMED_REMOTE_RESPONSE",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlayerNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidPlayerId(_))
    }

    /// Check if the remote statistics API caused this error
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable(_) | Self::RemoteStatus { .. } | Self::MalformedRemoteResponse(_)
        )
    }
}
