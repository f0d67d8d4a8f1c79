//! Error types for the storefront client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the storefront client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-401 HTTP error status, message extracted from the body when present
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP 401 after the refresh protocol has run (or while logged out)
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    /// The token refresh itself failed; the session is now logged out
    #[error("Token refresh failed: {0}")]
    RefreshFailed(#[source] Box<ApiError>),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Cache (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request data, rejected before dispatch
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    // == Status Code ==
    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    // == Is Auth Error ==
    /// True for errors that mean the caller should re-authenticate.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::RefreshFailed(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront client.
pub type Result<T> = std::result::Result<T, ApiError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_extraction() {
        let err = ApiError::Status {
            status: 400,
            message: "bad".to_string(),
        };
        assert_eq!(err.status(), Some(400));

        let err = ApiError::Unauthorized("please log in".to_string());
        assert_eq!(err.status(), Some(401));

        let err = ApiError::UnexpectedResponse("missing field".to_string());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_is_auth_error() {
        let unauthorized = ApiError::Unauthorized("expired".to_string());
        assert!(unauthorized.is_auth_error());

        let refresh = ApiError::RefreshFailed(Box::new(ApiError::Status {
            status: 403,
            message: "refresh token revoked".to_string(),
        }));
        assert!(refresh.is_auth_error());

        let validation = ApiError::Status {
            status: 422,
            message: "invalid".to_string(),
        };
        assert!(!validation.is_auth_error());
    }

    #[test]
    fn test_refresh_failed_display_includes_cause() {
        let err = ApiError::RefreshFailed(Box::new(ApiError::Status {
            status: 401,
            message: "refresh token expired".to_string(),
        }));
        let rendered = err.to_string();
        assert!(rendered.contains("refresh"));
        assert!(rendered.contains("401"));
    }
}
