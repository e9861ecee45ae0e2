//! Error types for the caching layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the caching layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache was asked to do something it was not configured for,
    /// e.g. private caching without a private key function
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The underlying HTTP call failed (DNS, connection, timeout).
    /// Propagated to the caller untouched; never retried by this layer.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A read or write against the store backend failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The origin violated the caching protocol, e.g. a 304 Not Modified
    /// with no stored entry to revalidate against
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl CacheError {
    /// Wraps an arbitrary transport-level failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CacheError::Transport(Box::new(err))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching layer.
pub type Result<T> = std::result::Result<T, CacheError>;
