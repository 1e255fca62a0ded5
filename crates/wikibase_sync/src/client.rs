//! The Wikibase client.

use crate::config::ClientConfig;
use crate::error::{WikibaseError, WikibaseResult};
use crate::labels::LabelMap;
use crate::session::EditTokenCache;
use crate::transport::{Method, NetworkClient};
use serde::de::DeserializeOwned;
use serde_json::Value;
use wikibase_protocol::{decode_reply, token_request, ApiRequest, Reply, TokenResponse};

/// A client for one Wikibase instance.
///
/// Holds the transport, the session's edit token and the label map. Label
/// resolution needs `&mut self`; creating items and uploading claims only
/// read the label map, and the edit token may be fetched from several
/// threads through a shared reference.
pub struct Client<C: NetworkClient> {
    network: C,
    config: ClientConfig,
    token: EditTokenCache,
    labels: LabelMap,
}

impl<C: NetworkClient> Client<C> {
    /// Creates a client with the default configuration.
    pub fn new(network: C) -> Self {
        Self::with_config(network, ClientConfig::default())
    }

    /// Creates a client with the given configuration.
    pub fn with_config(network: C, config: ClientConfig) -> Self {
        Self {
            network,
            config,
            token: EditTokenCache::new(),
            labels: LabelMap::new(),
        }
    }

    /// Seeds the label map, e.g. with one persisted from an earlier run.
    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = labels;
        self
    }

    /// Seeds the edit token so it is not fetched.
    pub fn with_edit_token(self, token: impl Into<String>) -> Self {
        Self {
            token: EditTokenCache::with_token(token),
            ..self
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn network(&self) -> &C {
        &self.network
    }

    /// Returns the label map.
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Returns the label map for seeding or editing.
    pub fn labels_mut(&mut self) -> &mut LabelMap {
        &mut self.labels
    }

    /// Returns the session's edit token, fetching it on first use.
    ///
    /// Concurrent first callers share a single fetch.
    pub fn edit_token(&self) -> WikibaseResult<String> {
        self.token.get_or_fetch(|| self.fetch_edit_token())
    }

    fn fetch_edit_token(&self) -> WikibaseResult<String> {
        tracing::debug!("fetching edit token");
        let (body, raw) = self.call::<TokenResponse>(Method::Get, token_request())?;
        match body.query.tokens.csrftoken {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(WikibaseError::unexpected("no edit token in reply", raw)),
        }
    }

    /// Sends a request and decodes the reply.
    ///
    /// A server-reported error takes precedence over everything else in the
    /// body. The decoded JSON is returned alongside the typed body for use
    /// in error messages.
    pub(crate) fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        request: ApiRequest,
    ) -> WikibaseResult<(T, Value)> {
        tracing::debug!(
            method = method.as_str(),
            action = request.action(),
            "sending request"
        );
        let args = request.into_args();
        let bytes = match method {
            Method::Get => self.network.get(&args),
            Method::Post => self.network.post(&args),
        }
        .map_err(|message| WikibaseError::Transport { message })?;

        match decode_reply::<T>(&bytes)? {
            Reply::Success { body, raw } => Ok((body, raw)),
            Reply::Failure(error) => {
                tracing::warn!(code = %error.code, info = %error.info, "server reported an error");
                Err(error.into())
            }
        }
    }
}

impl<C: NetworkClient + std::fmt::Debug> std::fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("network", &self.network)
            .field("config", &self.config)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}
