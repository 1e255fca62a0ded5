//! Network transport abstraction.
//!
//! The client never opens connections itself. Every API call is handed to a
//! [`NetworkClient`] as a flat argument set, and the raw reply body comes
//! back. Signing (OAuth 1.0a), the endpoint URL and `format=json` are the
//! implementation's concern.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use wikibase_protocol::ApiArgs;

/// An authenticated connection to a MediaWiki action API endpoint.
///
/// Implement this trait on top of any HTTP library. Errors are reported as
/// plain messages and surface as transport errors.
pub trait NetworkClient: Send + Sync {
    /// Sends a GET request with `args` as the query string.
    fn get(&self, args: &ApiArgs) -> Result<Vec<u8>, String>;

    /// Sends a POST request with `args` as a form body.
    fn post(&self, args: &ApiArgs) -> Result<Vec<u8>, String>;
}

impl<T: NetworkClient + ?Sized> NetworkClient for Arc<T> {
    fn get(&self, args: &ApiArgs) -> Result<Vec<u8>, String> {
        (**self).get(args)
    }

    fn post(&self, args: &ApiArgs) -> Result<Vec<u8>, String> {
        (**self).post(args)
    }
}

impl<T: NetworkClient + ?Sized> NetworkClient for &T {
    fn get(&self, args: &ApiArgs) -> Result<Vec<u8>, String> {
        (**self).get(args)
    }

    fn post(&self, args: &ApiArgs) -> Result<Vec<u8>, String> {
        (**self).post(args)
    }
}

/// HTTP method used for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read-only calls.
    Get,
    /// Writes.
    Post,
}

impl Method {
    /// Returns the method name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A call received by a [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// HTTP method.
    pub method: Method,
    /// Arguments as sent.
    pub args: ApiArgs,
}

/// A scripted transport for testing.
///
/// Replies are served in the order they were queued, whichever method is
/// used. Every call is recorded. A call with nothing queued fails with a
/// transport error.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<Vec<u8>, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    /// Creates a client with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply body.
    pub fn push_response(&self, body: impl Into<String>) {
        self.replies.lock().push_back(Ok(body.into().into_bytes()));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, message: impl Into<String>) {
        self.replies.lock().push_back(Err(message.into()));
    }

    /// Returns the number of calls received.
    pub fn invocation_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns every call received, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }

    /// Returns the number of replies not yet served.
    pub fn pending(&self) -> usize {
        self.replies.lock().len()
    }

    fn respond(&self, method: Method, args: &ApiArgs) -> Result<Vec<u8>, String> {
        self.calls.lock().push(RecordedCall {
            method,
            args: args.clone(),
        });
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(format!("no scripted reply for {} call", method.as_str())))
    }
}

impl NetworkClient for ScriptedClient {
    fn get(&self, args: &ApiArgs) -> Result<Vec<u8>, String> {
        self.respond(Method::Get, args)
    }

    fn post(&self, args: &ApiArgs) -> Result<Vec<u8>, String> {
        self.respond(Method::Post, args)
    }
}
