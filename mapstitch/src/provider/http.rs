//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::ProviderError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes, or an error. A non-success status is
    /// reported as [`ProviderError::Status`].
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::builder().build()
    }

    /// Creates a new ReqwestClient with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::builder().timeout_secs(timeout_secs).build()
    }

    /// Creates a client that sends browser-like headers on every request.
    ///
    /// Some tile servers refuse requests without a plausible `User-Agent`
    /// and `Referer`; the headers are installed as reqwest defaults so every
    /// GET carries them.
    pub fn impersonating(user_agent: &str, referer: &str) -> Result<Self, ProviderError> {
        Self::builder().impersonate(user_agent, referer).build()
    }

    fn builder() -> ReqwestClientBuilder {
        ReqwestClientBuilder {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: reqwest::header::HeaderMap::new(),
        }
    }
}

struct ReqwestClientBuilder {
    timeout_secs: u64,
    headers: reqwest::header::HeaderMap,
}

impl ReqwestClientBuilder {
    fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn impersonate(mut self, user_agent: &str, referer: &str) -> Self {
        use reqwest::header::{HeaderValue, REFERER, USER_AGENT};

        if let Ok(value) = HeaderValue::from_str(user_agent) {
            self.headers.insert(USER_AGENT, value);
        }
        if let Ok(value) = HeaderValue::from_str(referer) {
            self.headers.insert(REFERER, value);
        }
        self
    }

    fn build(self) -> Result<ReqwestClient, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .default_headers(self.headers)
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ReqwestClient { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProviderError::Http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::Http(format!("Failed to read response: {}", e)))
    }
}
