//! Discovery orchestration
//!
//! Sequences the three discovery stages as a strict fallback chain:
//!
//! 1. [`SpecLocator`](crate::spec::SpecLocator): look for an
//!    OpenAPI/Swagger document at well-known paths.
//! 2. [`SpecParser`](crate::spec::SpecParser): a successfully parsed
//!    spec is authoritative and returns immediately, even when it
//!    describes zero listable collections.
//! 3. [`ResponseProber`](crate::probe::ResponseProber): heuristic GET
//!    probing, only when no usable spec exists.
//!
//! Stages are never merged, and no failure propagates out of
//! [`DiscoveryEngine::discover`]: every stage error is folded into the
//! result's error list.

mod types;

pub use types::{DiscoveryResult, DiscoveryStrategy};

use crate::http::{HttpClient, HttpClientConfig, DEFAULT_TIMEOUT};
use crate::probe::ResponseProber;
use crate::spec::{SpecLocator, SpecParser};
use crate::types::StringMap;
use tracing::{debug, info, warn};

/// Orchestrates a discovery run against one base URL
pub struct DiscoveryEngine {
    client: HttpClient,
    base_url: String,
}

impl DiscoveryEngine {
    /// Create an engine for the given base URL.
    ///
    /// `auth_headers` are injected into every outbound request and
    /// `auth_params` are merged into every request's query string.
    /// `rate_limit_rps <= 0` disables the inter-request rate limit.
    pub fn new(
        base_url: impl Into<String>,
        auth_headers: StringMap,
        auth_params: StringMap,
        rate_limit_rps: f64,
    ) -> Self {
        let config = HttpClientConfig::builder()
            .timeout(DEFAULT_TIMEOUT)
            .headers(auth_headers)
            .params(auth_params)
            .rate_limit_rps(rate_limit_rps)
            .build();

        Self {
            client: HttpClient::with_config(config),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Run the full discovery chain.
    ///
    /// Always returns a well-formed result; on total failure the
    /// strategy is `none` and the error list is non-empty.
    pub async fn discover(&self) -> DiscoveryResult {
        let mut errors = Vec::new();

        let locator = SpecLocator::new(&self.client, &self.base_url);
        let located = locator.locate().await;

        if let Some((document, spec_url)) = located {
            match SpecParser::parse(&document) {
                Ok(parsed) => {
                    // A parsed spec that legitimately describes zero
                    // listable collections is still authoritative, so it
                    // short-circuits probing either way.
                    info!(
                        "spec at {spec_url} yielded {} endpoints",
                        parsed.endpoints.len()
                    );
                    return DiscoveryResult {
                        endpoints: parsed.endpoints,
                        pagination: parsed.pagination,
                        spec_url: Some(spec_url),
                        strategy: DiscoveryStrategy::OpenApi,
                        api_title: parsed.title,
                        api_description: parsed.description,
                        errors,
                    };
                }
                Err(e) => {
                    warn!("failed to parse spec at {spec_url}: {e}");
                    errors.push(format!("Failed to parse spec at {spec_url}: {e}"));
                }
            }
        } else {
            debug!("no spec document found for {}", self.base_url);
            errors.push("No OpenAPI or Swagger document found at any well-known path".to_string());
        }

        let prober = ResponseProber::new(&self.client, &self.base_url);
        let outcome = prober.probe().await;
        if !outcome.endpoints.is_empty() {
            info!("probing yielded {} endpoints", outcome.endpoints.len());
            return DiscoveryResult {
                endpoints: outcome.endpoints,
                pagination: outcome.pagination,
                strategy: DiscoveryStrategy::Probe,
                errors,
                ..DiscoveryResult::empty()
            };
        }

        if errors.is_empty() {
            errors.push("No endpoints discovered".to_string());
        }
        DiscoveryResult {
            errors,
            ..DiscoveryResult::empty()
        }
    }
}

/// Discover the collection endpoints of a REST API.
///
/// Convenience façade over [`DiscoveryEngine`]. Never returns an error:
/// total failure surfaces as `strategy == none` with a non-empty error
/// list. Only idempotent, read-only GETs are ever issued.
pub async fn discover_api(
    base_url: &str,
    auth_headers: StringMap,
    auth_params: StringMap,
    rate_limit_rps: f64,
) -> DiscoveryResult {
    DiscoveryEngine::new(base_url, auth_headers, auth_params, rate_limit_rps)
        .discover()
        .await
}

#[cfg(test)]
mod tests;
