//! In-memory cache honouring entry expiry

use super::types::{Cache, CacheKey, CachedPage};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    page: CachedPage,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Entry count at which `set` sweeps out expired entries
pub const DEFAULT_SWEEP_THRESHOLD: usize = 1024;

/// A process-local cache backed by a `HashMap`
///
/// Expired entries are treated as absent and dropped lazily on lookup. Once
/// the map holds at least the sweep threshold, every `set` first drops all
/// expired entries, so unread pages do not accumulate. Live entries are never
/// evicted; [`MemoryCache::clear`] drops everything.
#[derive(Debug)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    sweep_threshold: usize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::with_sweep_threshold(DEFAULT_SWEEP_THRESHOLD)
    }
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache sweeping expired entries at `threshold` entries
    pub fn with_sweep_threshold(threshold: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            sweep_threshold: threshold.max(1),
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no entries are stored
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired());
        before - entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Cache for MemoryCache {
    fn contains(&self, key: CacheKey) -> bool {
        self.lock().get(&key).is_some_and(|e| !e.is_expired())
    }

    fn get(&self, key: CacheKey) -> Option<CachedPage> {
        let mut entries = self.lock();
        match entries.get(&key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(&key);
                None
            }
            Some(entry) => Some(entry.page.clone()),
            None => None,
        }
    }

    fn set(&self, key: CacheKey, value: CachedPage, expires_at: DateTime<Utc>) {
        let mut entries = self.lock();
        if entries.len() >= self.sweep_threshold {
            let before = entries.len();
            entries.retain(|_, e| !e.is_expired());
            debug!("Swept {} expired cache entries", before - entries.len());
        }
        entries.insert(
            key,
            Entry {
                page: value,
                expires_at,
            },
        );
    }
}
