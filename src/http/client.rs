//! HTTP client for discovery probes
//!
//! A thin wrapper over reqwest that handles:
//! - Default headers and query parameters (auth material) on every request
//! - Per-request timeouts
//! - Token bucket rate limiting between outbound calls
//!
//! Discovery deliberately has no retry layer: a failed probe is absorbed
//! by the caller, which moves on to the next candidate path.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single discovery request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Headers sent with every request
    pub default_headers: StringMap,
    /// Query parameters merged into every request
    pub default_params: StringMap,
    /// Rate limiter configuration; None disables limiting
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            default_headers: StringMap::new(),
            default_params: StringMap::new(),
            rate_limit: None,
            user_agent: format!("restscout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Replace the default headers
    pub fn headers(mut self, headers: StringMap) -> Self {
        self.config.default_headers = headers;
        self
    }

    /// Add a default query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_params.insert(key.into(), value.into());
        self
    }

    /// Replace the default query parameters
    pub fn params(mut self, params: StringMap) -> Self {
        self.config.default_params = params;
        self
    }

    /// Set the outbound rate limit in requests per second; `<= 0` disables
    pub fn rate_limit_rps(mut self, rps: f64) -> Self {
        self.config.rate_limit = RateLimiterConfig::from_rps(rps);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Response data captured from a single GET
///
/// Status, headers, content type, and raw body are kept together so
/// callers can apply their own decode policy (JSON first, YAML fallback).
#[derive(Debug)]
pub struct FetchedResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Content-Type header value, empty when absent
    pub content_type: String,
    /// Raw response body
    pub body: String,
}

impl FetchedResponse {
    /// Only plain 200 responses count as usable during discovery
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Whether the response declared a JSON content type
    pub fn is_json(&self) -> bool {
        self.content_type.contains("json")
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP client used for all discovery traffic
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Self {
            client,
            config,
            rate_limiter,
        }
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Issue a single GET and capture the full response.
    ///
    /// Waits on the rate limiter first, then sends one request with the
    /// configured headers, query parameters, and timeout. No retries.
    pub async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !self.config.default_params.is_empty() {
            req = req.query(&self.config.default_params);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await.map_err(Error::Http)?;

        debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(FetchedResponse {
            status,
            headers,
            content_type,
            body,
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Join a base URL and a relative path, normalizing slashes
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
