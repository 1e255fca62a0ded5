//! Error types for the protocol crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while building requests or reading responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The response body was not valid JSON, or did not match the
    /// expected structure.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Description of the decoding error.
        message: String,
    },

    /// A request payload could not be encoded.
    #[error("failed to encode request: {message}")]
    Encode {
        /// Description of the encoding error.
        message: String,
    },
}

impl ProtocolError {
    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

/// An error reported by the MediaWiki API as `{"error": {"code", "info"}}`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {info}")]
pub struct ApiError {
    /// Machine readable error code.
    pub code: String,
    /// Human readable description.
    #[serde(default)]
    pub info: String,
}

impl ApiError {
    /// Creates an API error.
    pub fn new(code: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            info: info.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::new("badtoken", "Invalid CSRF token.");
        assert_eq!(err.to_string(), "badtoken: Invalid CSRF token.");
    }

    #[test]
    fn api_error_info_is_optional() {
        let err: ApiError = serde_json::from_str(r#"{"code":"readonly"}"#).unwrap();
        assert_eq!(err, ApiError::new("readonly", ""));
    }

    #[test]
    fn decode_error_display() {
        let err = ProtocolError::decode("expected value at line 1");
        assert_eq!(
            err.to_string(),
            "failed to decode response: expected value at line 1"
        );
    }
}
