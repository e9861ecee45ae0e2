//! Cache Entry Module
//!
//! The unit stored per cached resource: a plain response snapshot plus its
//! absolute expiry time.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::transport::HttpResponse;

// == Cache Entry ==
/// A stored response snapshot with its freshness horizon.
///
/// `expires_at` is an absolute epoch-milliseconds timestamp. `None` means the
/// entry has no fixed expiry: it was cached on the strength of a validator
/// (`ETag` / `Last-Modified`) alone, is stored without TTL, and is never
/// served without revalidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Response snapshot: status code, headers, body. No live transport state.
    pub response: HttpResponse,
    /// Absolute expiry (epoch milliseconds); None = validator-only entry
    pub expires_at: Option<i64>,
}

impl CacheEntry {
    /// Creates an entry for a response classified as cacheable.
    pub fn new(response: HttpResponse, expires_at: Option<i64>) -> Self {
        Self {
            response,
            expires_at,
        }
    }

    /// Whether the entry may be served without contacting the origin.
    ///
    /// Validator-only entries (no fixed expiry) are never fresh; they rely
    /// entirely on revalidation to detect change.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms <= expires,
            None => false,
        }
    }

    /// Store TTL for this entry: time remaining until expiry, floored at
    /// zero. `None` for validator-only entries (store without expiry).
    pub fn ttl_ms(&self, now_ms: i64) -> Option<u64> {
        self.expires_at.map(|expires| expires.saturating_sub(now_ms).max(0) as u64)
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in milliseconds.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::Headers;

    fn response() -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Headers::new(),
            body: "hello".to_string(),
        }
    }

    #[test]
    fn test_fresh_before_expiry() {
        let entry = CacheEntry::new(response(), Some(10_000));
        assert!(entry.is_fresh(9_999));
        // Boundary: still fresh exactly at the expiry instant
        assert!(entry.is_fresh(10_000));
        assert!(!entry.is_fresh(10_001));
    }

    #[test]
    fn test_validator_only_never_fresh() {
        let entry = CacheEntry::new(response(), None);
        assert!(!entry.is_fresh(0));
        assert!(!entry.is_fresh(i64::MAX));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(response(), Some(10_000));
        assert_eq!(entry.ttl_ms(4_000), Some(6_000));
        // Already expired: floored at zero
        assert_eq!(entry.ttl_ms(12_000), Some(0));
        // Validator-only: no store expiry
        assert_eq!(CacheEntry::new(response(), None).ttl_ms(0), None);
    }

    #[test]
    fn test_serde_roundtrip_matches_persisted_format() {
        let mut headers = Headers::new();
        headers.insert("ETag", "\"v1\"");
        let entry = CacheEntry::new(
            HttpResponse {
                status: 200,
                headers,
                body: "payload".to_string(),
            },
            Some(1_700_000_000_000),
        );

        let json = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);

        // Persisted shape is {response: {status, headers, body}, expires_at}
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["response"]["status"], 200);
        assert_eq!(value["response"]["body"], "payload");
        assert_eq!(value["expires_at"], 1_700_000_000_000i64);
    }
}
