//! Error handling utilities for repositories

use ladder_core::error::DomainError;
use sqlx::Error as SqlxError;
use tracing::warn;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Log and drop a row that no longer maps to a valid entity
pub fn skip_invalid_row<T>(result: Result<T, DomainError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Skipping unmappable cache row");
            None
        }
    }
}
