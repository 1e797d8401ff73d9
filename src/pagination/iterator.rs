//! Lazy page iterator
//!
//! One HTTP call per page, strictly sequential. Iteration ends once the page
//! counter passes the `X-Pages` total reported by the last response.

use super::response::{classify_error, parse_expires, parse_num_pages};
use crate::cache::{Cache, CacheKey, CachedPage};
use crate::error::{Error, Result};
use crate::request::{RequestParams, ResponseCallback, ResponseInfo};
use crate::spec::{Operation, PAGE_PARAM};
use crate::types::JsonValue;
use futures::stream::{self, Stream};
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};

/// Forward-only, finite sequence of response pages
///
/// ```ignore
/// while let Some(page) = pages.next_page().await? {
///     // ...
/// }
/// ```
pub struct PageIterator {
    http: Client,
    params: RequestParams,
    token: Option<String>,
    operation: Option<Arc<Operation>>,
    callbacks: Vec<ResponseCallback>,
    cache: Option<Arc<dyn Cache>>,
    page: u32,
    num_pages: u32,
    stop: bool,
}

impl PageIterator {
    /// Create an iterator positioned on page 1
    pub fn new(
        http: Client,
        params: RequestParams,
        operation: Option<Arc<Operation>>,
        callbacks: Vec<ResponseCallback>,
        token: Option<String>,
        cache: Option<Arc<dyn Cache>>,
    ) -> Self {
        Self {
            http,
            params,
            token,
            operation,
            callbacks,
            cache,
            page: 1,
            num_pages: 1,
            stop: false,
        }
    }

    /// Whether another page can be fetched
    pub fn has_next(&self) -> bool {
        !self.stop
    }

    /// Next page number to fetch
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total page count as last reported
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// The request being paged
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Fetch the next page, `None` once exhausted
    ///
    /// A failed fetch leaves the position unchanged.
    pub async fn next_page(&mut self) -> Result<Option<JsonValue>> {
        if self.stop {
            return Ok(None);
        }

        self.params.set_query(PAGE_PARAM, self.page);
        let data = self.fetch().await?;

        self.page += 1;
        if self.page > self.num_pages {
            self.stop = true;
        }
        Ok(Some(data))
    }

    /// Resolve the request once, as is, without touching the page parameter
    pub async fn get(&mut self) -> Result<JsonValue> {
        self.fetch().await
    }

    /// Drain the remaining pages into a vector
    pub async fn collect_pages(mut self) -> Result<Vec<JsonValue>> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }

    /// Drain the remaining pages, flattening array pages into one list
    pub async fn collect_items(self) -> Result<Vec<JsonValue>> {
        let mut items = Vec::new();
        for page in self.collect_pages().await? {
            match page {
                JsonValue::Array(values) => items.extend(values),
                other => items.push(other),
            }
        }
        Ok(items)
    }

    /// Turn the iterator into a stream of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<JsonValue>> {
        stream::try_unfold(self, |mut pages| async move {
            let next = pages.next_page().await?;
            Ok::<_, Error>(next.map(|page| (page, pages)))
        })
    }

    /// Key of the current request in the cache
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::compute(
            &self.params.url,
            &self.params.query,
            self.token.as_deref(),
            &self.params.headers,
            self.params.method,
            self.page,
        )
    }

    async fn fetch(&mut self) -> Result<JsonValue> {
        let Some(cache) = self.cache.clone() else {
            let (data, headers) = self.send().await?;
            self.num_pages = parse_num_pages(&headers);
            return Ok(data);
        };

        let key = self.cache_key();
        if cache.contains(key) {
            if let Some(hit) = cache.get(key) {
                debug!("Cache hit for {} (key {key})", self.params.url);
                self.num_pages = hit.num_pages;
                return Ok(hit.data);
            }
        }

        debug!("Cache miss for {} (key {key})", self.params.url);
        let (data, headers) = self.send().await?;
        self.num_pages = parse_num_pages(&headers);
        match parse_expires(&headers) {
            Some(expires) => cache.set(key, CachedPage::new(data.clone(), self.num_pages), expires),
            None => warn!(
                "Response from {} has no valid Expires header, not caching",
                self.params.url
            ),
        }
        Ok(data)
    }

    async fn send(&self) -> Result<(JsonValue, HeaderMap)> {
        let mut req = self
            .http
            .request(self.params.method.into(), &self.params.url);

        let query = self.params.query_pairs();
        if !query.is_empty() {
            req = req.query(&query);
        }
        for (key, value) in &self.params.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(ref body) = self.params.body {
            req = req.json(body);
        }
        if let Some(ref form) = self.params.form {
            req = req.form(form);
        }
        if let Some(timeout) = self.params.timeout {
            req = req.timeout(timeout);
        }

        debug!(
            "{} {} (page {}/{})",
            self.params.method, self.params.url, self.page, self.num_pages
        );
        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        self.notify(response.url().as_str(), status.as_u16(), &headers);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(classify_error(status, &text));
        }

        let data = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok((data, headers))
    }

    fn notify(&self, url: &str, status: u16, headers: &HeaderMap) {
        let Some(ref operation) = self.operation else {
            return;
        };
        if self.callbacks.is_empty() {
            return;
        }
        let info = ResponseInfo {
            url: url.to_string(),
            status,
            headers: headers.clone(),
        };
        for callback in &self.callbacks {
            callback(&info, operation.as_ref());
        }
    }
}

impl std::fmt::Debug for PageIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIterator")
            .field("params", &self.params)
            .field("page", &self.page)
            .field("num_pages", &self.num_pages)
            .field("stop", &self.stop)
            .field("has_cache", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
