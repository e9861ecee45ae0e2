//! Transport Module
//!
//! The seam between the caching layer and the actual HTTP client. The cache
//! never talks to the network itself; it hands a [`TransportRequest`] to a
//! [`Transport`] implementation and interprets the returned snapshot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};
use crate::headers::Headers;

// == Method ==
/// HTTP request method. Only `Get` participates in caching; every other
/// method bypasses the cache and goes straight to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// Whether requests with this method may be served from cache.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Method::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Transport Request ==
/// A request handed to the transport collaborator. Non-cache-related options
/// (headers, body) pass through untouched.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub uri: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl TransportRequest {
    /// Creates a bare GET request for a URI.
    pub fn get(uri: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            uri: uri.into(),
            headers: Headers::new(),
            body: None,
        }
    }
}

// == Http Response ==
/// Minimal response snapshot: status code, header map, body. Plain data with
/// no live connection state, so it can be stored and replayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// == Transport Contract ==
/// The HTTP transport the caching layer wraps.
///
/// Implementations own everything network-level: redirects, TLS, pooling,
/// timeouts. Errors they return are propagated to the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse>;
}

// == Reqwest Transport ==
/// Default transport over [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured client (custom timeouts, proxies, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut builder = self.client.request(method, &request.uri);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(CacheError::transport)?;

        let status = response.status().as_u16();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }
        let body = response.text().await.map_err(CacheError::transport)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_get_is_cacheable() {
        assert!(Method::Get.is_cacheable());
        for method in [
            Method::Head,
            Method::Post,
            Method::Put,
            Method::Delete,
            Method::Patch,
        ] {
            assert!(!method.is_cacheable(), "{method} must bypass the cache");
        }
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_is_success_range() {
        let mut response = HttpResponse {
            status: 200,
            headers: Headers::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 304;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }
}
