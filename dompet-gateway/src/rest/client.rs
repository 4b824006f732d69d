//! HTTP transport abstraction and its `reqwest` implementation.

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Serialized body, present for write methods.
    pub body: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpRequest {
    /// Returns the first header value with `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the path and query portion of the URL.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url
            .find("://")
            .and_then(|scheme_end| {
                let rest = &self.url[scheme_end + 3..];
                rest.find('/').map(|i| &rest[i..])
            })
            .unwrap_or("/")
    }
}

/// A raw upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The request produced no response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response within the request timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other client-side failure.
    #[error("{0}")]
    Other(String),
}

/// Sends HTTP requests.
///
/// Production code uses [`ReqwestTransport`]; tests substitute a scripted
/// implementation.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the upstream response, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        let timeout_ms = u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX);
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(request.timeout);

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| classify(&e, timeout_ms))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(&e, timeout_ms))?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout { timeout_ms }
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
