//! Redis Store Module
//!
//! Networked store backend mapped onto Redis: set-with-expiry via `PSETEX`,
//! pattern deletion via `KEYS` + bulk `DEL`, global flush via `FLUSHDB`.
//! TTL enforcement is delegated to Redis key expiry.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::Store;

// == Redis Store ==
/// Store backend over a multiplexed, auto-reconnecting Redis connection.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis at the given URL (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(storage_err)?;
        let manager = ConnectionManager::new(client).await.map_err(storage_err)?;
        debug!(url, "connected to redis store");
        Ok(Self { manager })
    }

    /// Connects using the URL from configuration.
    pub async fn from_config(config: &crate::config::CacheConfig) -> Result<Self> {
        let url = config.redis_url.as_deref().ok_or_else(|| {
            CacheError::Configuration("REDIS_URL is not set".to_string())
        })?;
        Self::connect(url).await
    }

    /// Wraps an existing connection manager.
    pub fn from_manager(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn set(&self, key: &str, value: String, ttl_ms: Option<u64>) -> Result<()> {
        let mut conn = self.manager.clone();
        match ttl_ms {
            Some(ms) if ms > 0 => {
                let _: () = conn.pset_ex(key, value, ms).await.map_err(storage_err)?;
            }
            _ => {
                let _: () = conn.set(key, value).await.map_err(storage_err)?;
            }
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await.map_err(storage_err)?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(key).await.map_err(storage_err)?;
        Ok(())
    }

    async fn delete_matching(&self, pattern: &str) -> Result<usize> {
        let mut conn = self.manager.clone();
        let keys: Vec<String> = conn.keys(pattern).await.map_err(storage_err)?;
        if keys.is_empty() {
            return Ok(0);
        }
        let _: () = conn.del(&keys).await.map_err(storage_err)?;
        debug!(pattern, removed = keys.len(), "redis pattern delete");
        Ok(keys.len())
    }

    async fn flush(&self, prefix: Option<&str>) -> Result<usize> {
        match prefix {
            Some(prefix) => self.delete_matching(&format!("{prefix}*")).await,
            None => {
                let mut conn = self.manager.clone();
                let count: usize = redis::cmd("DBSIZE")
                    .query_async(&mut conn)
                    .await
                    .map_err(storage_err)?;
                let _: () = redis::cmd("FLUSHDB")
                    .query_async(&mut conn)
                    .await
                    .map_err(storage_err)?;
                Ok(count)
            }
        }
    }
}

fn storage_err(err: redis::RedisError) -> CacheError {
    CacheError::Storage(err.to_string())
}

// == Integration Tests ==
// Require a running Redis; run with `REDIS_URL=redis://127.0.0.1/ cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;

    async fn connect() -> RedisStore {
        let url = std::env::var("REDIS_URL").expect("REDIS_URL must be set for redis tests");
        RedisStore::connect(&url).await.expect("redis connection")
    }

    #[tokio::test]
    #[ignore]
    async fn test_set_get_delete_roundtrip() {
        let store = connect().await;

        store
            .set("rc-test:key", "value".to_string(), None)
            .await
            .unwrap();
        assert_eq!(
            store.get("rc-test:key").await.unwrap(),
            Some("value".to_string())
        );

        store.delete("rc-test:key").await.unwrap();
        assert_eq!(store.get("rc-test:key").await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore]
    async fn test_ttl_expiry_is_delegated_to_redis() {
        let store = connect().await;

        store
            .set("rc-test:expiring", "value".to_string(), Some(50))
            .await
            .unwrap();
        assert!(store.get("rc-test:expiring").await.unwrap().is_some());

        tokio::time::sleep(std::time::Duration::from_millis(80)).await;
        assert_eq!(store.get("rc-test:expiring").await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore]
    async fn test_delete_matching_and_scoped_flush() {
        let store = connect().await;

        store
            .set("rc-test:a", "1".to_string(), None)
            .await
            .unwrap();
        store
            .set("rc-test:b", "2".to_string(), None)
            .await
            .unwrap();
        store
            .set("rc-other:c", "3".to_string(), None)
            .await
            .unwrap();

        assert_eq!(store.flush(Some("rc-test:")).await.unwrap(), 2);
        assert!(store.get("rc-other:c").await.unwrap().is_some());
        assert_eq!(store.delete_matching("rc-other:*").await.unwrap(), 1);
        assert_eq!(store.delete_matching("rc-other:*").await.unwrap(), 0);
    }
}
