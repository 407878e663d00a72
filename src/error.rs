//! Error types for API calls.

use reqwest::StatusCode;

/// Result alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by [`ApiClient`](crate::client::ApiClient) calls.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout).
    NoResponse(reqwest::Error),
    /// The backend rejected the session (HTTP 403). The auth session has
    /// already been cleared and navigation to the login view requested.
    Forbidden { status: StatusCode },
    /// Any other non-success status, passed through for caller handling.
    Status { status: StatusCode, body: String },
    /// The response arrived but its JSON payload could not be decoded.
    Decode(reqwest::Error),
}

impl ApiError {
    /// Returns the HTTP status of the failed call, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::NoResponse(_) => None,
            ApiError::Forbidden { status } => Some(*status),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode(e) => e.status(),
        }
    }

    /// True when the call failed because the session is no longer valid.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NoResponse(e) => {
                write!(f, "No response received: {}", e)
            }
            ApiError::Forbidden { .. } => {
                write!(f, "Access forbidden: the session is no longer valid")
            }
            ApiError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "Request failed with HTTP {}", status.as_u16())
                } else {
                    write!(f, "Request failed with HTTP {}: {}", status.as_u16(), body)
                }
            }
            ApiError::Decode(e) => {
                write!(f, "Failed to parse JSON response: {}", e)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::NoResponse(e) | ApiError::Decode(e) => Some(e),
            ApiError::Forbidden { .. } | ApiError::Status { .. } => None,
        }
    }
}
