//! Header Map Module
//!
//! A case-insensitive string-to-string header mapping. Lookups and presence
//! checks are explicit; names are normalized to lowercase on insertion so the
//! serialized form is stable regardless of how the origin capitalized them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// == Headers ==
/// Case-insensitive HTTP header map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    map: HashMap<String, String>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.map.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Looks up a header value by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&name.to_ascii_lowercase()).map(|v| v.as_str())
    }

    /// Checks whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    /// Overlays every header from `other` onto this map, replacing
    /// existing values for the same names.
    pub fn extend_from(&mut self, other: &Headers) {
        for (name, value) in &other.map {
            self.map.insert(name.clone(), value.clone());
        }
    }

    /// Iterates over (name, value) pairs. Names are lowercase.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no headers are present.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Headers {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut headers = Headers::new();
        for (name, value) in pairs {
            headers.insert(name, value);
        }
        headers
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = Headers::new();
        headers.insert("Cache-Control", "max-age=300");

        assert_eq!(headers.get("cache-control"), Some("max-age=300"));
        assert_eq!(headers.get("CACHE-CONTROL"), Some("max-age=300"));
        assert!(headers.contains("Cache-Control"));
        assert!(!headers.contains("Expires"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut headers = Headers::new();
        headers.insert("ETag", "\"v1\"");
        headers.insert("etag", "\"v2\"");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("ETag"), Some("\"v2\""));
    }

    #[test]
    fn test_extend_from_overlays() {
        let mut stored = Headers::from([("etag", "\"v1\""), ("content-type", "text/plain")]);
        let update = Headers::from([("etag", "\"v2\"")]);

        stored.extend_from(&update);

        assert_eq!(stored.get("etag"), Some("\"v2\""));
        // Headers absent from the update are kept
        assert_eq!(stored.get("content-type"), Some("text/plain"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let headers = Headers::from([("Date", "Sun, 06 Nov 1994 08:49:37 GMT")]);

        let json = serde_json::to_string(&headers).unwrap();
        let back: Headers = serde_json::from_str(&json).unwrap();

        assert_eq!(back, headers);
        assert_eq!(back.get("date"), Some("Sun, 06 Nov 1994 08:49:37 GMT"));
    }
}
