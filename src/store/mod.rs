//! Store Module
//!
//! The key/value storage contract the caching layer writes through, plus the
//! reference backends: a bounded in-memory store and a Redis-backed store.

mod lru;
mod memory;
mod redis;
mod stats;


// Re-export public types
pub use memory::MemoryStore;
pub use redis::RedisStore;
pub use stats::StoreStats;

use async_trait::async_trait;

use crate::error::Result;

// == Store Contract ==
/// Minimal key/value contract for cache storage backends.
///
/// Values are opaque serialized strings; the store owns physical expiry
/// enforcement while the cache layer owns logical interpretation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Stores a value under a key.
    ///
    /// With `ttl_ms` of `Some(ms)` where `ms > 0`, the key must become
    /// unreachable via [`Store::get`] once `ms` milliseconds elapse,
    /// independent of intervening traffic. `None` or `Some(0)` stores
    /// without expiry.
    async fn set(&self, key: &str, value: String, ttl_ms: Option<u64>) -> Result<()>;

    /// Retrieves a value by key. `Ok(None)` means absent; errors are
    /// reserved for backend failures.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes an exact key; no-op when the key does not exist.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes every key matching a pattern with a single `*` wildcard
    /// standing for any character sequence. Returns the number of keys
    /// removed; zero matches is not an error.
    async fn delete_matching(&self, pattern: &str) -> Result<usize>;

    /// Removes entries, scoped to keys starting with `prefix` when one is
    /// given and the backend supports scoped flush; global otherwise.
    /// Returns the number of keys removed.
    async fn flush(&self, prefix: Option<&str>) -> Result<usize>;
}

// == Null Store ==
/// Null-object store for running with caching disabled: every `get` misses
/// and every write succeeds as a no-op. Passed in explicitly by the caller
/// instead of hiding a global default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

#[async_trait]
impl Store for NullStore {
    async fn set(&self, _key: &str, _value: String, _ttl_ms: Option<u64>) -> Result<()> {
        Ok(())
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_matching(&self, _pattern: &str) -> Result<usize> {
        Ok(0)
    }

    async fn flush(&self, _prefix: Option<&str>) -> Result<usize> {
        Ok(0)
    }
}

// == Wildcard Matching ==
/// Tests a key against a pattern containing at most one `*` wildcard.
///
/// Without a wildcard the match is exact. With one, the key must carry the
/// pattern's prefix and suffix without overlapping them.
pub(crate) fn key_matches(key: &str, pattern: &str) -> bool {
    match pattern.find('*') {
        Some(pos) => {
            let (prefix, suffix) = (&pattern[..pos], &pattern[pos + 1..]);
            key.len() >= prefix.len() + suffix.len()
                && key.starts_with(prefix)
                && key.ends_with(suffix)
        }
        None => key == pattern,
    }
}
