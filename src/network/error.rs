//! API error taxonomy

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by calls to the shigure backend
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend rejected the passcode or token
    #[error("credential rejected ({status})")]
    InvalidCredential { status: u16 },

    /// The request could not be completed
    #[error("network error: {0}")]
    NetworkError(String),

    /// Unexpected status or a body that cannot be used
    #[error("server error ({status}): {message}")]
    ServerError { status: u16, message: String },
}

impl ApiError {
    /// Classify a non-success status
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::InvalidCredential {
                    status: status.as_u16(),
                }
            }
            _ => ApiError::ServerError {
                status: status.as_u16(),
                message: body.trim().to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return ApiError::ServerError {
                status: e.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("malformed body: {}", e),
            };
        }
        let msg = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            format!("request failed: {}", e)
        };
        ApiError::NetworkError(msg)
    }
}
