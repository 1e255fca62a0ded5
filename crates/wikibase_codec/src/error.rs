//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while turning field values into claim payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The field's type has no Wikibase encoding.
    #[error("unsupported field type: {type_name}")]
    UnsupportedType {
        /// Name of the unsupported type.
        type_name: String,
    },

    /// An entity reference could not be decoded.
    #[error("invalid entity reference {value:?}: {reason}")]
    InvalidEntityReference {
        /// The offending text.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A timestamp's year cannot be written in the four-digit form.
    #[error("timestamp {value} is outside years 0 to 9999")]
    TimeOutOfRange {
        /// The offending timestamp.
        value: String,
    },

    /// A payload could not be rendered as JSON.
    #[error("serialization failed: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
    },
}

impl CodecError {
    /// Create an unsupported type error.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid entity reference error.
    pub fn invalid_reference(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntityReference {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
