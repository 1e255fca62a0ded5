//! Client configuration and stored OAuth credentials.

use crate::error::{WikibaseError, WikibaseResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Language used for labels when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Language tag for labels and label searches.
    pub language: String,
    /// Whether property and claim writes are flagged as bot edits.
    pub bot_edits: bool,
}

impl ClientConfig {
    /// Creates a configuration with English labels and bot edits enabled.
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            bot_edits: true,
        }
    }

    /// Sets the label language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets whether writes are flagged as bot edits.
    pub fn with_bot_edits(mut self, enabled: bool) -> Self {
        self.bot_edits = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// OAuth consumer key pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerInformation {
    /// Consumer key.
    pub key: String,
    /// Consumer secret.
    pub secret: String,
}

/// OAuth access token pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Access token.
    pub token: String,
    /// Access secret.
    pub secret: String,
}

/// Credentials for an OAuth 1.0a transport, as stored on disk.
///
/// ```json
/// {"consumer": {"key": "…", "secret": "…"}, "access": {"token": "…", "secret": "…"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthInformation {
    /// Consumer credentials.
    pub consumer: ConsumerInformation,
    /// Access credentials, absent until the user has authorized the consumer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessToken>,
}

impl OAuthInformation {
    /// Loads credentials from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> WikibaseResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            WikibaseError::Config(format!("cannot open {}: {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            WikibaseError::Config(format!("cannot parse {}: {e}", path.display()))
        })
    }

    /// Returns true if an access token is present.
    pub fn is_authorized(&self) -> bool {
        self.access.is_some()
    }

    /// Returns the action API endpoint of the wiki at `base_url`.
    pub fn api_url(base_url: &str) -> String {
        OAuthEndpoints::new(base_url).api_url
    }

    /// Returns the endpoints of the wiki at `base_url`.
    pub fn endpoints(base_url: &str) -> OAuthEndpoints {
        OAuthEndpoints::new(base_url)
    }
}

/// URLs a transport needs to talk to a wiki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoints {
    /// Action API endpoint.
    pub api_url: String,
    /// Temporary credential request URL.
    pub request_token_url: String,
    /// Resource owner authorization URL.
    pub authorize_token_url: String,
    /// Token request URL.
    pub access_token_url: String,
}

impl OAuthEndpoints {
    /// Derives all endpoints from the wiki's base URL, e.g.
    /// `https://wiki.example.org`.
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_url: format!("{base}/w/api.php"),
            request_token_url: format!("{base}/wiki/Special:OAuth/initiate"),
            authorize_token_url: format!("{base}/wiki/Special:OAuth/authorize"),
            access_token_url: format!("{base}/wiki/Special:OAuth/token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.language, "en");
        assert!(config.bot_edits);

        let config = config.with_language("de").with_bot_edits(false);
        assert_eq!(config.language, "de");
        assert!(!config.bot_edits);
    }

    #[test]
    fn load_with_access_token() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"consumer":{{"key":"ck","secret":"cs"}},"access":{{"token":"at","secret":"as"}}}}"#
        )
        .unwrap();

        let info = OAuthInformation::load(file.path()).unwrap();
        assert_eq!(info.consumer.key, "ck");
        assert_eq!(info.consumer.secret, "cs");
        assert!(info.is_authorized());
        assert_eq!(info.access.unwrap().token, "at");
    }

    #[test]
    fn load_without_access_token() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"consumer":{{"key":"ck","secret":"cs"}}}}"#).unwrap();

        let info = OAuthInformation::load(file.path()).unwrap();
        assert!(!info.is_authorized());
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"consumer":{"key":"ck","secret":"cs"}}"#
        );
    }

    #[test]
    fn load_errors_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("oauth.json");
        assert!(matches!(
            OAuthInformation::load(&missing),
            Err(WikibaseError::Config(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            OAuthInformation::load(file.path()),
            Err(WikibaseError::Config(_))
        ));
    }

    #[test]
    fn endpoints_from_base_url() {
        let endpoints = OAuthInformation::endpoints("https://wiki.example.org/");
        assert_eq!(endpoints.api_url, "https://wiki.example.org/w/api.php");
        assert_eq!(
            endpoints.request_token_url,
            "https://wiki.example.org/wiki/Special:OAuth/initiate"
        );
        assert_eq!(
            endpoints.authorize_token_url,
            "https://wiki.example.org/wiki/Special:OAuth/authorize"
        );
        assert_eq!(
            endpoints.access_token_url,
            "https://wiki.example.org/wiki/Special:OAuth/token"
        );
    }
}
