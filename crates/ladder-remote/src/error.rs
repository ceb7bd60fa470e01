//! Remote client errors

use ladder_core::DomainError;
use thiserror::Error;

/// Remote statistics API client errors
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote API error ({status})")]
    Status { status: u16 },

    #[error("Unexpected content type: {0}")]
    ContentType(String),

    #[error("Undecodable body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Player record has no name")]
    MissingName,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<RemoteError> for DomainError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Http(e) => DomainError::RemoteUnavailable(e.to_string()),
            RemoteError::Status { status } => DomainError::RemoteStatus { status },
            RemoteError::ContentType(_) | RemoteError::Decode(_) | RemoteError::MissingName => {
                DomainError::MalformedRemoteResponse(err.to_string())
            }
            RemoteError::Config(msg) => DomainError::InternalError(msg),
        }
    }
}
