//! Transport adapter
//!
//! Opens one HTTP session per call, carrying:
//! - the configured user agent on every request
//! - `Authorization: Bearer <token>` when a token is supplied
//! - the shared response cache, if any

use super::response::EsiResponse;
use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::pagination::PageIterator;
use crate::request::{RequestParams, ResponseCallback};
use crate::spec::Operation;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Default user agent string
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// HTTP transport for operation calls
#[derive(Clone)]
pub struct EsiHttpClient {
    user_agent: String,
    timeout: Option<Duration>,
    cache: Option<Arc<dyn Cache>>,
}

impl EsiHttpClient {
    /// Create a transport with the given user agent
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout: None,
            cache: None,
        }
    }

    /// Set a client-wide timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the response cache
    #[must_use]
    pub fn with_cache(mut self, cache: Option<Arc<dyn Cache>>) -> Self {
        self.cache = cache;
        self
    }

    /// The configured user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The response cache, if any
    pub fn cache(&self) -> Option<&Arc<dyn Cache>> {
        self.cache.as_ref()
    }

    /// Replace the response cache
    pub fn set_cache(&mut self, cache: Option<Arc<dyn Cache>>) {
        self.cache = cache;
    }

    /// Build a fresh session with the default headers for one call
    pub fn session(&self, token: Option<&str>) -> Result<Client> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::config(format!("Invalid authorization token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .user_agent(&self.user_agent)
            .default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Issue a built request
    ///
    /// Paginated operations get a lazy [`PageIterator`]; everything else is
    /// resolved immediately into a single value.
    pub async fn request(
        &self,
        params: RequestParams,
        operation: Option<Arc<Operation>>,
        response_callbacks: Vec<ResponseCallback>,
        authorization_token: Option<&str>,
    ) -> Result<EsiResponse> {
        let session = self.session(authorization_token)?;
        let paginated = operation.as_ref().is_some_and(|op| op.paginated);

        let mut pages = PageIterator::new(
            session,
            params,
            operation,
            response_callbacks,
            authorization_token.map(String::from),
            self.cache.clone(),
        );

        if paginated {
            Ok(EsiResponse::Pages(pages))
        } else {
            Ok(EsiResponse::Value(pages.get().await?))
        }
    }
}

impl Default for EsiHttpClient {
    fn default() -> Self {
        Self::new(default_user_agent())
    }
}

impl std::fmt::Debug for EsiHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsiHttpClient")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("has_cache", &self.cache.is_some())
            .finish()
    }
}
