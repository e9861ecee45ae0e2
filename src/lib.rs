//! Request Caching - an HTTP response caching layer
//!
//! Sits transparently in front of an outbound HTTP client: decides per
//! response whether it may be stored, computes its lifetime from
//! `Cache-Control` / `Expires` / validator headers, serves fresh entries
//! without touching the network, and revalidates stale ones with
//! `If-None-Match` / `If-Modified-Since`. Entries are partitioned into
//! public and private namespaces over a pluggable store backend.
//!
//! ```no_run
//! use std::sync::Arc;
//! use request_caching::{CachingClient, MemoryStore, PartitionedCache, ReqwestTransport};
//!
//! # async fn example() -> request_caching::Result<()> {
//! let store = Arc::new(MemoryStore::new(1000));
//! let cache = PartitionedCache::new(store);
//! let client = CachingClient::new(ReqwestTransport::new(), cache);
//!
//! let first = client.get("http://example.com/").await?;
//! let second = client.get("http://example.com/").await?; // served from cache while fresh
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod store;
pub mod tasks;
pub mod transport;

pub use cache::{CacheEntry, CacheHit, PartitionedCache};
pub use client::{CacheStatus, CachingClient, ClientResponse, RequestOptions};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use headers::Headers;
pub use store::{MemoryStore, NullStore, RedisStore, Store, StoreStats};
pub use tasks::spawn_cleanup_task;
pub use transport::{HttpResponse, Method, ReqwestTransport, Transport, TransportRequest};
