/// Error type for GridMesh API operations
///
/// Every client operation returns `Result<T, ApiError>`. Remote failures
/// (HTTP status >= 400) carry the numeric status code and the best-effort
/// message extracted from the response body, so callers can map specific
/// statuses (404, 403) to their own error taxonomy without re-parsing
/// anything.

use thiserror::Error;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified error type for GridMesh API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// The platform returned an error status (>= 400)
    ///
    /// `message` is the `message` field of a JSON error body when the body
    /// parses as JSON, otherwise the raw response text.
    #[error("GridMesh API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the platform
        status: u16,

        /// Best-effort error message extracted from the response body
        message: String,
    },

    /// The request never produced a usable response (connection failure,
    /// timeout, invalid URL)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response body did not match the expected shape
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code for remote API failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True if the platform answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True if the platform refused the operation with 403
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// The remote-supplied message for API failures, or the transport/decode
    /// error text otherwise
    pub fn message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = ApiError::Api {
            status: 404,
            message: "Task not found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_forbidden());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "Task not found");

        let err = ApiError::Api {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_display_includes_status_and_message() {
        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "GridMesh API error (500): boom");
    }
}
