//! Partitioned Cache Module
//!
//! Translates semantic (URI, privacy-flag) pairs into physical store
//! operations: pluggable key derivation for the public and private
//! namespaces, JSON value (de)serialization, and a TTL override hook.

pub mod entry;

pub use entry::CacheEntry;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::Store;

/// Derives a physical store key from a request URI.
///
/// A private key function typically mixes in a caller credential, e.g. a
/// hash of an OAuth token plus the URI.
pub type KeyFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Rewrites the requested TTL before a store write. Lets tests and
/// cache-warming jobs force near-zero lifetimes.
pub type TtlFn = Arc<dyn Fn(Option<u64>) -> Option<u64> + Send + Sync>;

// == Cache Hit ==
/// A successful lookup, tagged with the partition it came from.
#[derive(Debug, Clone)]
pub struct CacheHit<T> {
    pub value: T,
    /// True when the value was found under the private key
    pub private: bool,
}

// == Partitioned Cache ==
/// Public/private façade over a [`Store`].
///
/// Public and private entries for the same URI never collide: they live
/// under distinct derived keys. Reads check the private partition first and
/// fall back to the public one; writes target exactly the requested
/// partition.
#[derive(Clone)]
pub struct PartitionedCache {
    store: Arc<dyn Store>,
    prefix: Option<String>,
    public_key_fn: Option<KeyFn>,
    private_key_fn: Option<KeyFn>,
    ttl_override: Option<TtlFn>,
}

impl PartitionedCache {
    /// Creates a cache over a store with default (identity) public keys.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            prefix: None,
            public_key_fn: None,
            private_key_fn: None,
            ttl_override: None,
        }
    }

    /// Prepends a prefix to default public keys and scopes [`Self::flush`]
    /// to it. Lets several cache families share one store.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Replaces the default public key derivation.
    pub fn with_public_key_fn(mut self, f: KeyFn) -> Self {
        self.public_key_fn = Some(f);
        self
    }

    /// Enables private caching with the given key derivation. Without this,
    /// any private `set` fails with [`CacheError::Configuration`].
    pub fn with_private_key_fn(mut self, f: KeyFn) -> Self {
        self.private_key_fn = Some(f);
        self
    }

    /// Installs a TTL override applied to every write.
    pub fn with_ttl_override(mut self, f: TtlFn) -> Self {
        self.ttl_override = Some(f);
        self
    }

    // == Set ==
    /// Serializes and stores a value under the requested partition.
    pub async fn set<T: Serialize>(
        &self,
        uri: &str,
        private: bool,
        value: &T,
        ttl_ms: Option<u64>,
    ) -> Result<()> {
        let key = if private {
            self.private_key(uri)?
        } else {
            self.public_key(uri)
        };
        let ttl_ms = match &self.ttl_override {
            Some(f) => f(ttl_ms),
            None => ttl_ms,
        };
        let serialized = serde_json::to_string(value)?;
        debug!(uri, private, ?ttl_ms, "caching entry");
        self.store.set(&key, serialized, ttl_ms).await
    }

    // == Get ==
    /// Retrieves a value for a URI: private partition first (when
    /// configured), then public. `Ok(None)` when neither exists.
    ///
    /// Corrupt stored data fails closed: the decode error propagates rather
    /// than masquerading as a miss.
    pub async fn get<T: DeserializeOwned>(&self, uri: &str) -> Result<Option<T>> {
        Ok(self.lookup(uri).await?.map(|hit| hit.value))
    }

    // == Lookup ==
    /// Like [`Self::get`], but reports which partition the value came from.
    pub async fn lookup<T: DeserializeOwned>(&self, uri: &str) -> Result<Option<CacheHit<T>>> {
        if let Some(key_fn) = &self.private_key_fn {
            if let Some(raw) = self.store.get(&key_fn(uri)).await? {
                return Ok(Some(CacheHit {
                    value: serde_json::from_str(&raw)?,
                    private: true,
                }));
            }
        }
        match self.store.get(&self.public_key(uri)).await? {
            Some(raw) => Ok(Some(CacheHit {
                value: serde_json::from_str(&raw)?,
                private: false,
            })),
            None => Ok(None),
        }
    }

    // == Flush ==
    /// Removes this cache's entries: scoped to the configured prefix when
    /// one is set, global otherwise. Returns the number removed.
    pub async fn flush(&self) -> Result<usize> {
        self.store.flush(self.prefix.as_deref()).await
    }

    // == Delete Matching ==
    /// Removes store keys matching a single-`*` wildcard pattern.
    pub async fn delete_matching(&self, pattern: &str) -> Result<usize> {
        self.store.delete_matching(pattern).await
    }

    fn public_key(&self, uri: &str) -> String {
        match &self.public_key_fn {
            Some(key_fn) => key_fn(uri),
            None => format!("{}{}", self.prefix.as_deref().unwrap_or(""), uri),
        }
    }

    fn private_key(&self, uri: &str) -> Result<String> {
        match &self.private_key_fn {
            Some(key_fn) => Ok(key_fn(uri)),
            None => Err(CacheError::Configuration(
                "cannot cache privately without a private key function".to_string(),
            )),
        }
    }
}
