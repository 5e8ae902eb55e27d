//! Well-known-path probing for OpenAPI/Swagger documents

use crate::http::{join_url, HttpClient};
use serde_json::Value;
use tracing::debug;

/// Relative paths where APIs conventionally publish their contract,
/// in probe order
pub const WELL_KNOWN_SPEC_PATHS: &[&str] = &[
    "/openapi.json",
    "/swagger.json",
    "/openapi.yaml",
    "/openapi.yml",
    "/swagger.yaml",
    "/api-docs",
    "/v2/api-docs",
    "/v3/api-docs",
    "/api/openapi.json",
    "/api/swagger.json",
    "/docs/openapi.json",
    "/.well-known/openapi.json",
];

/// Probes well-known relative paths for an OpenAPI/Swagger document
pub struct SpecLocator<'a> {
    client: &'a HttpClient,
    base_url: &'a str,
}

impl<'a> SpecLocator<'a> {
    /// Create a locator for the given base URL
    pub fn new(client: &'a HttpClient, base_url: &'a str) -> Self {
        Self { client, base_url }
    }

    /// Try each well-known path and return the first accepted document
    /// together with the URL it was fetched from.
    ///
    /// Any network, decode, or parse error on a given path is swallowed
    /// and the loop proceeds to the next candidate; total failure returns
    /// None. This function never errors.
    pub async fn locate(&self) -> Option<(Value, String)> {
        for path in WELL_KNOWN_SPEC_PATHS {
            let url = join_url(self.base_url, path);
            if let Some(document) = self.try_path(&url).await {
                debug!("found spec document at {url}");
                return Some((document, url));
            }
        }
        None
    }

    async fn try_path(&self, url: &str) -> Option<Value> {
        let response = match self.client.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                debug!("spec probe {url} failed: {e}");
                return None;
            }
        };

        if !response.is_ok() {
            debug!("spec probe {url} returned {}", response.status);
            return None;
        }

        let document = parse_document(&response.body)?;
        if is_spec_document(&document) {
            Some(document)
        } else {
            debug!("spec probe {url} returned JSON without an openapi/swagger key");
            None
        }
    }
}

/// Parse a candidate document body, as JSON first and YAML second
fn parse_document(body: &str) -> Option<Value> {
    serde_json::from_str(body)
        .ok()
        .or_else(|| serde_yaml::from_str::<Value>(body).ok())
}

/// A document is accepted only if it is object-like and versioned.
///
/// Guards against a generic JSON page matching a lucky path.
fn is_spec_document(document: &Value) -> bool {
    document.get("openapi").is_some() || document.get("swagger").is_some()
}
