//! Error types for the sync client.

use serde_json::Value;
use thiserror::Error;
use wikibase_codec::{CodecError, EntityId, EntityKind};
use wikibase_protocol::{ApiError, ProtocolError};

/// Result type for client operations.
pub type WikibaseResult<T> = Result<T, WikibaseError>;

/// Errors that can occur while talking to a Wikibase instance.
#[derive(Error, Debug)]
pub enum WikibaseError {
    /// An argument or record failed a local check; nothing was sent.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// No entity of the requested kind has exactly this label.
    #[error("no {kind} found with label {label:?}")]
    NotFound {
        /// Kind searched for.
        kind: EntityKind,
        /// Label searched for.
        label: String,
    },

    /// More than one entity of the requested kind has exactly this label.
    #[error("multiple {kind} IDs found for label {label:?}: {ids:?}")]
    Ambiguous {
        /// Kind searched for.
        kind: EntityKind,
        /// Label searched for.
        label: String,
        /// Every matching ID.
        ids: Vec<String>,
    },

    /// The server reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server reported success but the reply did not have the
    /// expected shape.
    #[error("unexpected response: {message}: {response}")]
    UnexpectedResponse {
        /// What was missing or wrong.
        message: String,
        /// The decoded reply.
        response: Value,
    },

    /// A field value could not be encoded.
    #[error("failed to encode property {label:?}: {source}")]
    Encoding {
        /// Label of the property the field maps to.
        label: String,
        /// Underlying codec error.
        source: CodecError,
    },

    /// Creating or updating a claim failed.
    #[error("failed to upload claim {property} ({label:?}) on {entity}: {source}")]
    ClaimFailed {
        /// Label of the property.
        label: String,
        /// Property ID.
        property: EntityId,
        /// Entity the claim belongs to.
        entity: EntityId,
        /// Underlying error.
        source: Box<WikibaseError>,
    },

    /// The transport failed before a reply was received.
    #[error("transport error: {message}")]
    Transport {
        /// Error message from the transport.
        message: String,
    },

    /// A reply could not be decoded, or a request could not be encoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl WikibaseError {
    /// Creates a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates an unexpected response error.
    pub fn unexpected(message: impl Into<String>, response: Value) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
            response,
        }
    }

    /// Creates an encoding error for the property with this label.
    pub fn encoding(label: impl Into<String>, source: CodecError) -> Self {
        Self::Encoding {
            label: label.into(),
            source,
        }
    }

    /// Returns true for label resolution failures (not found, ambiguous).
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }

    /// Returns the server-reported error, looking through claim context.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::ClaimFailed { source, .. } => source.api_error(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_is_verbatim() {
        let err = WikibaseError::from(ApiError::new("badtoken", "Invalid token"));
        assert_eq!(err.to_string(), "badtoken: Invalid token");
    }

    #[test]
    fn resolution_errors() {
        let not_found = WikibaseError::NotFound {
            kind: EntityKind::Property,
            label: "Name".into(),
        };
        assert!(not_found.is_resolution());
        assert_eq!(not_found.to_string(), "no property found with label \"Name\"");

        let ambiguous = WikibaseError::Ambiguous {
            kind: EntityKind::Item,
            label: "Paris".into(),
            ids: vec!["Q1".into(), "Q2".into()],
        };
        assert!(ambiguous.is_resolution());
        assert!(!WikibaseError::precondition("x").is_resolution());
    }

    #[test]
    fn claim_failure_exposes_api_error() {
        let err = WikibaseError::ClaimFailed {
            label: "test".into(),
            property: EntityId::property(14),
            entity: EntityId::item(23),
            source: Box::new(ApiError::new("modification-failed", "no").into()),
        };
        assert_eq!(err.api_error().map(|e| e.code.as_str()), Some("modification-failed"));
        let text = err.to_string();
        assert!(text.contains("P14"));
        assert!(text.contains("Q23"));
    }

    #[test]
    fn unexpected_response_embeds_body() {
        let err = WikibaseError::unexpected("success flag not set", json!({"success": 0}));
        assert!(err.to_string().contains("\"success\":0"));
    }
}
