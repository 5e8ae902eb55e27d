//! Heuristic GET probing against common collection paths

use crate::http::{join_url, HttpClient};
use crate::pagination::{detect_pagination, DiscoveredPagination};
use crate::schema::SchemaInferencer;
use crate::types::{path_to_name, DiscoveredEndpoint, DiscoveredField};
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

/// Common collection-path guesses, in probe order
pub const PROBE_PATHS: &[&str] = &[
    "/api/v1",
    "/api",
    "/v1",
    "/markets",
    "/users",
    "/events",
    "/items",
    "/products",
    "/orders",
    "/customers",
    "/transactions",
    "/accounts",
    "/posts",
    "/articles",
    "/data",
    "/list",
];

/// Rows fed to schema inference per endpoint
const SAMPLE_ROWS: usize = 10;

/// What a probe run produced
#[derive(Debug, Default)]
pub struct ProbeOutcome {
    /// Endpoints accumulated across every probed URL
    pub endpoints: Vec<DiscoveredEndpoint>,
    /// First non-none pagination classification across all probes
    pub pagination: DiscoveredPagination,
}

/// Issues heuristic GETs and infers endpoints from live responses
pub struct ResponseProber<'a> {
    client: &'a HttpClient,
    base_url: &'a str,
    inferencer: SchemaInferencer,
}

impl<'a> ResponseProber<'a> {
    /// Create a prober for the given base URL
    pub fn new(client: &'a HttpClient, base_url: &'a str) -> Self {
        Self {
            client,
            base_url,
            inferencer: SchemaInferencer::new(),
        }
    }

    /// Probe the base URL and every candidate path.
    ///
    /// Unlike spec parsing, probing does not stop at the first hit: it
    /// accumulates endpoints across every probed URL. Failed probes
    /// (network errors, non-200, non-JSON) are skipped silently.
    /// Pagination keeps the first non-none classification; later probes
    /// never override it.
    pub async fn probe(&self) -> ProbeOutcome {
        let mut outcome = ProbeOutcome {
            pagination: DiscoveredPagination::none(),
            ..ProbeOutcome::default()
        };

        // The base URL itself is the first candidate
        for path in std::iter::once("/").chain(PROBE_PATHS.iter().copied()) {
            let url = join_url(self.base_url, path);
            let Some((body, headers)) = self.fetch_json(&url).await else {
                continue;
            };

            outcome.endpoints.extend(self.endpoints_from_body(path, &body));

            if outcome.pagination.is_none() {
                outcome.pagination = detect_pagination(&body, &headers);
            }
        }

        outcome
    }

    /// GET one URL, keeping only usable JSON responses
    async fn fetch_json(&self, url: &str) -> Option<(Value, HeaderMap)> {
        let response = match self.client.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                debug!("probe {url} failed: {e}");
                return None;
            }
        };

        if !response.is_ok() {
            debug!("probe {url} returned {}", response.status);
            return None;
        }
        if !response.is_json() {
            debug!("probe {url} returned non-JSON content type '{}'", response.content_type);
            return None;
        }

        match response.json() {
            Ok(body) => Some((body, response.headers)),
            Err(e) => {
                debug!("probe {url} body did not parse as JSON: {e}");
                None
            }
        }
    }

    /// Turn a probed body into zero or more endpoints.
    ///
    /// A non-empty array body means the probed URL itself is a
    /// collection. An object body is scanned for every key holding a
    /// non-empty array of objects; each becomes a synthetic sub-endpoint
    /// named after the key.
    fn endpoints_from_body(&self, path: &str, body: &Value) -> Vec<DiscoveredEndpoint> {
        match body {
            Value::Array(rows) if !rows.is_empty() => {
                let endpoint = DiscoveredEndpoint::new(path_to_name(path), path)
                    .with_fields(self.sample_fields(rows));
                vec![endpoint]
            }
            Value::Object(map) => {
                let mut endpoints = Vec::new();
                for (key, value) in map {
                    let Some(rows) = value.as_array() else {
                        continue;
                    };
                    if rows.is_empty() || !rows.iter().all(Value::is_object) {
                        continue;
                    }
                    endpoints.push(
                        DiscoveredEndpoint::new(key, path).with_fields(self.sample_fields(rows)),
                    );
                }
                endpoints
            }
            _ => Vec::new(),
        }
    }

    fn sample_fields(&self, rows: &[Value]) -> Vec<DiscoveredField> {
        let sample = &rows[..rows.len().min(SAMPLE_ROWS)];
        self.inferencer.infer_fields(sample)
    }
}
