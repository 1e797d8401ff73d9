//! Response cache module
//!
//! Pages are cached under a [`CacheKey`] until the expiry the API declared in
//! its `Expires` header. Callers plug in any [`Cache`] implementation;
//! [`MemoryCache`] is bundled.

mod memory;
mod types;

pub use memory::{MemoryCache, DEFAULT_SWEEP_THRESHOLD};
pub use types::{Cache, CacheKey, CachedPage};
