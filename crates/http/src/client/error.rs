//! Client error types

use pawhaven_core::CoreError;
use std::sync::Arc;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Reading or writing the stored tokens failed
    #[error("Credential storage failed: {0}")]
    Credentials(#[from] CoreError),

    /// Reading a file to upload failed
    #[error("Upload failed: {0}")]
    Upload(#[from] std::io::Error),

    /// The shared token refresh failed; every caller waiting on it gets the same error
    #[error("Token refresh failed: {0}")]
    RefreshFailed(Arc<ClientError>),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status behind this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::ServerError { status, .. } => Some(*status),
            Self::AuthenticationFailed(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::RefreshFailed(inner) => inner.status(),
            _ => None,
        }
    }

    /// Whether the session is gone and the user has to log in again
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_) | Self::RefreshFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_statuses() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound(_)
        ));
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into());
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_auth_expired());
    }

    #[test]
    fn refresh_failure_counts_as_expired_session() {
        let inner = ClientError::from_status(StatusCode::UNAUTHORIZED, "token_not_valid".into());
        let err = ClientError::RefreshFailed(Arc::new(inner));
        assert!(err.is_auth_expired());
        assert_eq!(err.status(), Some(401));
    }
}
