//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the in-memory store can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Connection URL for the networked store, if one is used
    pub redis_url: Option<String>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum in-memory store entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    /// - `REDIS_URL` - Networked store URL (default: unset)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            redis_url: env::var("REDIS_URL").ok(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            cleanup_interval: 1,
            redis_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.cleanup_interval, 1);
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("MAX_ENTRIES");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("REDIS_URL");

        let config = CacheConfig::from_env();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.cleanup_interval, 1);
        assert!(config.redis_url.is_none());
    }
}
