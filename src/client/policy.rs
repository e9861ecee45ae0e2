//! Caching Policy Module
//!
//! HTTP cacheability and freshness rules derived from response headers.
//!
//! Precedence: a `Cache-Control` header short-circuits the analysis (with
//! `max-age` the response is cacheable, without it it is not, regardless of
//! other headers); otherwise `Expires` sets a fixed expiry; otherwise a
//! validator (`ETag` / `Last-Modified`) makes the response cacheable with no
//! fixed expiry.

use std::collections::HashMap;

use chrono::DateTime;

use crate::headers::Headers;

// == Cacheability ==
/// Outcome of the response-header analysis for a storable response.
#[derive(Debug, Clone, PartialEq)]
pub struct Cacheability {
    /// Absolute expiry (epoch ms); None = validator-only, no fixed expiry
    pub expires_at: Option<i64>,
    /// Whether the entry belongs in the private partition
    pub private: bool,
}

// == Analysis ==
/// Classifies a response by its headers. `None` means not cacheable.
///
/// `received_at_ms` substitutes for a missing `Date` header when computing
/// the `max-age` expiry.
pub fn analyze(headers: &Headers, received_at_ms: i64) -> Option<Cacheability> {
    if let Some(cache_control) = headers.get("cache-control") {
        let directives = parse_directives(cache_control);
        let max_age: i64 = directives.get("max-age")?.as_deref()?.parse().ok()?;

        let base = headers
            .get("date")
            .and_then(parse_http_date)
            .unwrap_or(received_at_ms);
        // Saturate: an absurdly large max-age clamps to the far future
        // instead of overflowing
        return Some(Cacheability {
            expires_at: Some(base.saturating_add(max_age.saturating_mul(1000))),
            private: directives.contains_key("private"),
        });
    }

    if let Some(expires) = headers.get("expires") {
        // An unparseable Expires reads as already expired: the entry is
        // stored but immediately stale
        return Some(Cacheability {
            expires_at: Some(parse_http_date(expires).unwrap_or(0)),
            private: false,
        });
    }

    if headers.contains("etag") || headers.contains("last-modified") {
        return Some(Cacheability {
            expires_at: None,
            private: false,
        });
    }

    None
}

// == Directive Parsing ==
/// Parses comma-separated `name` / `name=value` Cache-Control directives.
/// Names are lowercased, whitespace stripped; flag directives map to None.
pub fn parse_directives(value: &str) -> HashMap<String, Option<String>> {
    value
        .split(',')
        .map(|directive| directive.trim())
        .filter(|directive| !directive.is_empty())
        .map(|directive| match directive.split_once('=') {
            Some((name, value)) => (
                name.trim().to_ascii_lowercase(),
                Some(value.trim().to_string()),
            ),
            None => (directive.to_ascii_lowercase(), None),
        })
        .collect()
}

// == Date Parsing ==
/// Parses an HTTP date (IMF-fixdate, RFC 2822 compatible) to epoch ms.
pub fn parse_http_date(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "Sun, 06 Nov 1994 08:49:37 GMT";
    const DATE_MS: i64 = 784_111_777_000;

    #[test]
    fn test_max_age_expiry_is_date_plus_seconds() {
        let headers = Headers::from([("Cache-Control", "max-age=300"), ("Date", DATE)]);

        let result = analyze(&headers, 0).unwrap();
        assert_eq!(result.expires_at, Some(DATE_MS + 300_000));
        assert!(!result.private);
    }

    #[test]
    fn test_max_age_without_date_uses_receipt_time() {
        let headers = Headers::from([("Cache-Control", "max-age=10")]);

        let result = analyze(&headers, 5_000).unwrap();
        assert_eq!(result.expires_at, Some(15_000));
    }

    #[test]
    fn test_huge_max_age_clamps_to_far_future() {
        let headers = Headers::from([
            ("Cache-Control", "max-age=9223372036854775807"),
            ("Date", DATE),
        ]);

        let result = analyze(&headers, 0).unwrap();
        assert_eq!(result.expires_at, Some(i64::MAX));

        // Still saturated when the receipt time is the base
        let headers = Headers::from([("Cache-Control", "max-age=9223372036854775807")]);
        let result = analyze(&headers, 1_000_000).unwrap();
        assert_eq!(result.expires_at, Some(i64::MAX));
    }

    #[test]
    fn test_private_directive_sets_partition() {
        let headers = Headers::from([("Cache-Control", "private, max-age=300"), ("Date", DATE)]);

        let result = analyze(&headers, 0).unwrap();
        assert!(result.private);
    }

    #[test]
    fn test_no_cache_is_not_cacheable() {
        let headers = Headers::from([("Cache-Control", "no-cache")]);
        assert_eq!(analyze(&headers, 0), None);
    }

    #[test]
    fn test_cache_control_without_max_age_shadows_other_headers() {
        // Cache-Control presence short-circuits: no fallback to Expires/ETag
        let headers = Headers::from([
            ("Cache-Control", "no-store"),
            ("Expires", DATE),
            ("ETag", "\"v1\""),
        ]);
        assert_eq!(analyze(&headers, 0), None);
    }

    #[test]
    fn test_expires_header_sets_exact_expiry() {
        let headers = Headers::from([("Expires", DATE)]);

        let result = analyze(&headers, 0).unwrap();
        assert_eq!(result.expires_at, Some(DATE_MS));
        assert!(!result.private);
    }

    #[test]
    fn test_unparseable_expires_is_immediately_stale() {
        let headers = Headers::from([("Expires", "-1"), ("ETag", "\"v1\"")]);

        let result = analyze(&headers, 0).unwrap();
        assert_eq!(result.expires_at, Some(0));
    }

    #[test]
    fn test_validator_only_has_no_fixed_expiry() {
        for header in ["ETag", "Last-Modified"] {
            let headers = Headers::from([(header, "x")]);
            let result = analyze(&headers, 0).unwrap();
            assert_eq!(result.expires_at, None);
        }
    }

    #[test]
    fn test_no_caching_headers_means_not_cacheable() {
        let headers = Headers::from([("Content-Type", "text/plain")]);
        assert_eq!(analyze(&headers, 0), None);
    }

    #[test]
    fn test_directive_parsing_strips_whitespace() {
        let directives = parse_directives(" private , max-age = 60 , no-transform");

        assert!(directives.contains_key("private"));
        assert_eq!(
            directives.get("max-age"),
            Some(&Some("60".to_string()))
        );
        assert_eq!(directives.get("no-transform"), Some(&None));
    }

    #[test]
    fn test_malformed_max_age_is_not_cacheable() {
        let headers = Headers::from([("Cache-Control", "max-age=soon")]);
        assert_eq!(analyze(&headers, 0), None);

        // Flag-form max-age has no value to use either
        let headers = Headers::from([("Cache-Control", "max-age")]);
        assert_eq!(analyze(&headers, 0), None);
    }

    #[test]
    fn test_rfc2822_date_with_offset_zone() {
        assert_eq!(
            parse_http_date("Sun, 06 Nov 1994 08:49:37 +0000"),
            Some(DATE_MS)
        );
        assert_eq!(parse_http_date("not a date"), None);
    }
}
