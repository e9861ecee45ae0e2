//! Caching Client Module
//!
//! The request orchestration layer: cache lookup, freshness test,
//! conditional revalidation, cacheability analysis, and storage of new
//! entries. The actual network call is delegated to the [`Transport`]
//! collaborator.
//!
//! Concurrent requests for the same URI are not coalesced: they may race
//! between lookup and store, and the last writer wins.

pub mod policy;

use tracing::{debug, warn};

use crate::cache::entry::now_ms;
use crate::cache::{CacheEntry, CacheHit, PartitionedCache};
use crate::error::{CacheError, Result};
use crate::headers::Headers;
use crate::transport::{HttpResponse, Method, Transport, TransportRequest};

// == Cache Status ==
/// How a logical request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from storage without a network call
    Hit,
    /// Origin confirmed the stored entry via 304 Not Modified
    Revalidated,
    /// Fetched from the origin (and stored when cacheable)
    Fetched,
    /// Non-GET request passed straight through to the transport
    Bypassed,
}

// == Client Response ==
/// The outcome of a request through the caching client.
///
/// `store_error` carries a cache-write failure that occurred after a
/// successful fetch; the HTTP response itself is never overturned by one.
#[derive(Debug)]
pub struct ClientResponse {
    pub response: HttpResponse,
    pub cache_status: CacheStatus,
    pub store_error: Option<CacheError>,
}

// == Request Options ==
/// Per-request options handed through to the transport. Everything
/// non-cache-related passes untouched.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Headers,
    pub body: Option<String>,
}

// == Caching Client ==
/// HTTP client wrapper that serves fresh cached responses without touching
/// the network and revalidates stale ones with conditional requests.
pub struct CachingClient<T: Transport> {
    transport: T,
    cache: PartitionedCache,
}

impl<T: Transport> CachingClient<T> {
    pub fn new(transport: T, cache: PartitionedCache) -> Self {
        Self { transport, cache }
    }

    /// Convenience GET with default options.
    pub async fn get(&self, uri: &str) -> Result<ClientResponse> {
        self.request(uri, RequestOptions::default()).await
    }

    // == Request ==
    /// Runs one logical request through the cache pipeline:
    /// lookup → fresh hit, or network (conditionally revalidating) →
    /// 304 short-circuit or cacheability analysis and store.
    pub async fn request(&self, uri: &str, options: RequestOptions) -> Result<ClientResponse> {
        // Only idempotent GET reads participate in caching
        if !options.method.is_cacheable() {
            debug!(uri, method = %options.method, "bypassing cache");
            let response = self
                .transport
                .send(TransportRequest {
                    method: options.method,
                    uri: uri.to_string(),
                    headers: options.headers,
                    body: options.body,
                })
                .await?;
            return Ok(ClientResponse {
                response,
                cache_status: CacheStatus::Bypassed,
                store_error: None,
            });
        }

        // A storage read failure aborts here, before any network call
        let hit: Option<CacheHit<CacheEntry>> = self.cache.lookup(uri).await?;

        let now = now_ms();
        if let Some(hit) = &hit {
            if hit.value.is_fresh(now) {
                debug!(uri, "serving fresh entry from cache");
                return Ok(ClientResponse {
                    response: hit.value.response.clone(),
                    cache_status: CacheStatus::Hit,
                    store_error: None,
                });
            }
        }

        // Stale entry with validators: ask the origin whether it changed
        let mut headers = options.headers;
        if let Some(hit) = &hit {
            let stored = &hit.value.response.headers;
            if let Some(etag) = stored.get("etag") {
                headers.insert("If-None-Match", etag);
            }
            if let Some(last_modified) = stored.get("last-modified") {
                headers.insert("If-Modified-Since", last_modified);
            }
        }

        // Transport errors propagate untouched; no cache mutation
        let response = self
            .transport
            .send(TransportRequest {
                method: Method::Get,
                uri: uri.to_string(),
                headers,
                body: options.body,
            })
            .await?;

        if response.status == 304 {
            return self.handle_not_modified(uri, hit, response, now).await;
        }

        let mut store_error = None;
        if response.is_success() {
            if let Some(cacheability) = policy::analyze(&response.headers, now) {
                let entry = CacheEntry::new(response.clone(), cacheability.expires_at);
                let ttl_ms = entry.ttl_ms(now);
                store_error = self
                    .cache
                    .set(uri, cacheability.private, &entry, ttl_ms)
                    .await
                    .err();
                if let Some(err) = &store_error {
                    warn!(uri, %err, "failed to store cacheable response");
                }
            }
        }

        Ok(ClientResponse {
            response,
            cache_status: CacheStatus::Fetched,
            store_error,
        })
    }

    /// 304 path: return the stored response, refreshing its headers from the
    /// 304 (origins may update validators or metadata on revalidation) while
    /// preserving body and expiry. Receiving a 304 with nothing stored is an
    /// invariant violation.
    async fn handle_not_modified(
        &self,
        uri: &str,
        hit: Option<CacheHit<CacheEntry>>,
        response: HttpResponse,
        now: i64,
    ) -> Result<ClientResponse> {
        let hit = hit.ok_or_else(|| {
            CacheError::Protocol("received 304 Not Modified with no stored entry".to_string())
        })?;

        let mut entry = hit.value;
        entry.response.headers.extend_from(&response.headers);

        let ttl_ms = entry.ttl_ms(now);
        let store_error = self.cache.set(uri, hit.private, &entry, ttl_ms).await.err();
        if let Some(err) = &store_error {
            warn!(uri, %err, "failed to refresh revalidated entry");
        }

        debug!(uri, "origin confirmed stored entry");
        Ok(ClientResponse {
            response: entry.response,
            cache_status: CacheStatus::Revalidated,
            store_error,
        })
    }
}
