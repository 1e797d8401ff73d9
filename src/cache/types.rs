//! Cache trait and key types

use crate::types::{JsonValue, Method, QueryMap, StringMap};
use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Key identifying one page of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(u64);

impl CacheKey {
    /// Hash the request identity into a key
    ///
    /// Any difference in URL, query, token, headers, method or page yields a
    /// different key.
    pub fn compute(
        url: &str,
        params: &QueryMap,
        auth: Option<&str>,
        headers: &StringMap,
        method: Method,
        page: u32,
    ) -> Self {
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        params.hash(&mut hasher);
        auth.hash(&mut hasher);
        headers.hash(&mut hasher);
        method.as_str().hash(&mut hasher);
        page.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Raw hash value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for CacheKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A cached response page
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage {
    /// Decoded response payload
    pub data: JsonValue,
    /// Total page count reported alongside it
    pub num_pages: u32,
}

impl CachedPage {
    /// Create a cached page
    pub fn new(data: JsonValue, num_pages: u32) -> Self {
        Self { data, num_pages }
    }
}

/// Pluggable response cache
///
/// Implementations decide eviction. Methods take `&self`; the handle is
/// shared as `Arc<dyn Cache>`, so implementations carry their own locking.
pub trait Cache: Send + Sync {
    /// Check whether a live entry exists for the key
    fn contains(&self, key: CacheKey) -> bool;

    /// Fetch the entry for the key
    fn get(&self, key: CacheKey) -> Option<CachedPage>;

    /// Store an entry until `expires_at`
    fn set(&self, key: CacheKey, value: CachedPage, expires_at: DateTime<Utc>);
}
