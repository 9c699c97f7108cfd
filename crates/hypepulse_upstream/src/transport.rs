//! HTTP transport seam.
//!
//! The upstream clients only need "GET this URL, give me status and body".
//! Keeping that behind a trait lets tests script upstream behavior without a
//! network.

use async_trait::async_trait;
use derive_getters::Getters;
use hypepulse_error::HttpError;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Raw HTTP response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    /// Create a response from its parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is 5xx or 429, both worth another attempt.
    pub fn is_transient(&self) -> bool {
        self.status >= 500 || self.status == 429
    }
}

/// Performs HTTP GET requests.
///
/// Implementations return `Err` only for transport failures (connection,
/// timeout, TLS). Any HTTP status, including errors, is an `Ok` response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch a URL.
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hypepulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    // The URL carries the API key, so it stays out of the span.
    #[instrument(skip_all)]
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "Request failed");
            HttpError::new(format!("Request failed: {}", e))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "Failed to read response body");
            HttpError::new(format!("Failed to read response body: {}", e))
        })?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(HttpResponse { status, body })
    }
}
