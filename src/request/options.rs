//! Per-call arguments and request options

use crate::spec::Operation;
use crate::types::{JsonValue, StringMap};
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Status and headers of a live response, handed to response callbacks
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    /// Final request URL
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
}

/// Callback invoked after every live (non-cached) response
pub type ResponseCallback = Arc<dyn Fn(&ResponseInfo, &Operation) + Send + Sync>;

/// Request-level overrides
#[derive(Clone, Default)]
pub struct RequestOptions {
    /// Extra headers sent with every page
    pub headers: StringMap,
    /// Per-request timeout
    pub timeout: Option<Duration>,
    /// Response callbacks
    pub response_callbacks: Vec<ResponseCallback>,
}

impl std::fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOptions")
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("response_callbacks", &self.response_callbacks.len())
            .finish()
    }
}

/// Arguments for one operation call
///
/// # Examples
///
/// ```ignore
/// let args = CallArgs::new()
///     .param("character_id", 90000001)
///     .token("access-token")
///     .header("Accept-Language", "en");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    /// Parameter values keyed by declared name
    pub params: BTreeMap<String, JsonValue>,
    /// Bearer token
    pub token: Option<String>,
    /// Request options
    pub options: RequestOptions,
}

impl CallArgs {
    /// Create empty call arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set the bearer token
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a request header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(key.into(), value.into());
        self
    }

    /// Set a per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Register a response callback
    #[must_use]
    pub fn on_response<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ResponseInfo, &Operation) + Send + Sync + 'static,
    {
        self.options.response_callbacks.push(Arc::new(callback));
        self
    }

    /// The token, treating an empty string as absent
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
