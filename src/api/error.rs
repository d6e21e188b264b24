//! Errors returned by the projectarium API client

use thiserror::Error;

/// Failure talking to the API.
///
/// Payloads are plain strings so results can be cloned into messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure or timeout
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// The body was not the JSON we expected
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = ApiError::Status {
            status: 404,
            message: "project not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 404): project not found");
    }

    #[test]
    fn test_json_errors_are_decode_errors() {
        let err: ApiError = serde_json::from_str::<Vec<i64>>("{").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
