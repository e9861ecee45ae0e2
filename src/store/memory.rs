//! In-Memory Store Module
//!
//! Bounded in-process store backend: LRU capacity eviction, lazy TTL expiry,
//! wildcard deletion, and prefix-scoped flush.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::entry::now_ms;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::store::lru::RecencyList;
use crate::store::stats::StoreStats;
use crate::store::{key_matches, Store};

// == Store Record ==
/// A stored value with its optional absolute expiry.
#[derive(Debug, Clone)]
struct StoreRecord {
    value: String,
    /// Epoch milliseconds; None = no expiry
    expires_at: Option<i64>,
}

impl StoreRecord {
    fn is_expired(&self, now: i64) -> bool {
        matches!(self.expires_at, Some(expires) if now >= expires)
    }
}

// == Memory Store ==
/// Fixed-capacity in-memory store.
///
/// Capacity is never exceeded: inserting a new key at capacity evicts exactly
/// one entry, the least recently used. Reads refresh recency. Expired records
/// are removed lazily on access; [`crate::tasks::spawn_cleanup_task`] can
/// sweep them actively.
///
/// Safe under concurrent readers and writers: all index mutation happens
/// behind a single store-wide lock, which is never held across an await.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    max_entries: usize,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, StoreRecord>,
    recency: RecencyList,
    stats: StoreStats,
}

impl MemoryStore {
    /// Creates a store holding at most `max_entries` records. A capacity of
    /// zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_entries: max_entries.max(1),
        }
    }

    /// Creates a store sized from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// Returns current store statistics.
    pub fn stats(&self) -> Result<StoreStats> {
        let inner = self.read_inner()?;
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.records.len();
        Ok(stats)
    }

    /// Current number of stored records, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.read_inner().map(|inner| inner.records.len()).unwrap_or(0)
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every expired record. Returns the number removed.
    pub fn cleanup_expired(&self) -> Result<usize> {
        let mut inner = self.write_inner()?;
        let now = now_ms();
        let expired: Vec<String> = inner
            .records
            .iter()
            .filter(|(_, record)| record.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.records.remove(key);
            inner.recency.forget(key);
            inner.stats.record_expiration();
        }
        Ok(expired.len())
    }

    fn read_inner(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| CacheError::Storage("memory store lock poisoned".to_string()))
    }

    fn write_inner(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| CacheError::Storage("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn set(&self, key: &str, value: String, ttl_ms: Option<u64>) -> Result<()> {
        let mut inner = self.write_inner()?;
        let is_overwrite = inner.records.contains_key(key);

        // At capacity, free exactly one slot before inserting a new key
        if !is_overwrite && inner.records.len() >= self.max_entries {
            if let Some(evicted) = inner.recency.pop_oldest() {
                inner.records.remove(&evicted);
                inner.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        let expires_at = match ttl_ms {
            Some(ms) if ms > 0 => Some(now_ms() + ms as i64),
            _ => None,
        };
        inner
            .records
            .insert(key.to_string(), StoreRecord { value, expires_at });
        inner.recency.record_use(key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        enum Found {
            Live(String),
            Expired,
            Absent,
        }

        let mut inner = self.write_inner()?;
        let found = match inner.records.get(key) {
            Some(record) if record.is_expired(now_ms()) => Found::Expired,
            Some(record) => Found::Live(record.value.clone()),
            None => Found::Absent,
        };

        match found {
            Found::Live(value) => {
                inner.stats.record_hit();
                inner.recency.record_use(key);
                Ok(Some(value))
            }
            Found::Expired => {
                inner.records.remove(key);
                inner.recency.forget(key);
                inner.stats.record_expiration();
                inner.stats.record_miss();
                Ok(None)
            }
            Found::Absent => {
                inner.stats.record_miss();
                Ok(None)
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.write_inner()?;
        if inner.records.remove(key).is_some() {
            inner.recency.forget(key);
        }
        Ok(())
    }

    async fn delete_matching(&self, pattern: &str) -> Result<usize> {
        let mut inner = self.write_inner()?;
        let matched: Vec<String> = inner
            .records
            .keys()
            .filter(|key| key_matches(key, pattern))
            .cloned()
            .collect();

        for key in &matched {
            inner.records.remove(key);
            inner.recency.forget(key);
        }
        debug!(pattern, removed = matched.len(), "pattern delete");
        Ok(matched.len())
    }

    async fn flush(&self, prefix: Option<&str>) -> Result<usize> {
        let mut inner = self.write_inner()?;
        match prefix {
            Some(prefix) => {
                let matched: Vec<String> = inner
                    .records
                    .keys()
                    .filter(|key| key.starts_with(prefix))
                    .cloned()
                    .collect();
                for key in &matched {
                    inner.records.remove(key);
                    inner.recency.forget(key);
                }
                Ok(matched.len())
            }
            None => {
                let removed = inner.records.len();
                inner.records.clear();
                inner.recency = RecencyList::new();
                Ok(removed)
            }
        }
    }
}
