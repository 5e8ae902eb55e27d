//! Tests for discovery orchestration

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_parsed_spec_short_circuits_probing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "openapi": "3.0.0",
            "info": {"title": "Spec API"},
            "paths": {
                "/users": {"get": {"responses": {}}}
            }
        })))
        .mount(&mock_server)
        .await;
    // A probe-able collection also exists; it must never be consulted
    Mock::given(method("GET"))
        .and(path("/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&mock_server)
        .await;

    let engine = DiscoveryEngine::new(mock_server.uri(), Default::default(), Default::default(), 0.0);
    let result = engine.discover().await;

    assert_eq!(result.strategy, DiscoveryStrategy::OpenApi);
    assert_eq!(result.api_title, "Spec API");
    assert_eq!(result.endpoints.len(), 1);
    assert_eq!(result.endpoints[0].name, "users");
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_spec_with_zero_endpoints_still_wins() {
    let mock_server = MockServer::start().await;

    // The spec parses fine but describes no listable collections
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "openapi": "3.0.0", "paths": {}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&mock_server)
        .await;

    let engine = DiscoveryEngine::new(mock_server.uri(), Default::default(), Default::default(), 0.0);
    let result = engine.discover().await;

    // An authoritative spec suppresses probing even when empty
    assert_eq!(result.strategy, DiscoveryStrategy::OpenApi);
    assert!(result.endpoints.is_empty());
}

#[tokio::test]
async fn test_unparseable_spec_falls_back_to_probe() {
    let mock_server = MockServer::start().await;

    // Versioned but missing the paths object: parse fails
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "openapi": "3.0.0"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "symbol": "BTC-USD"}
        ])))
        .mount(&mock_server)
        .await;

    let engine = DiscoveryEngine::new(mock_server.uri(), Default::default(), Default::default(), 0.0);
    let result = engine.discover().await;

    assert_eq!(result.strategy, DiscoveryStrategy::Probe);
    assert_eq!(result.endpoints.len(), 1);
    assert_eq!(result.endpoints[0].name, "markets");
    // The parse failure is reported alongside the probe result
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("Failed to parse spec"));
}

#[tokio::test]
async fn test_no_spec_no_probe_is_none_with_errors() {
    let mock_server = MockServer::start().await;
    // Every path 404s

    let engine = DiscoveryEngine::new(mock_server.uri(), Default::default(), Default::default(), 0.0);
    let result = engine.discover().await;

    assert_eq!(result.strategy, DiscoveryStrategy::None);
    assert!(result.endpoints.is_empty());
    assert!(!result.errors.is_empty());
}

#[tokio::test]
async fn test_trailing_slash_base_url_is_normalized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "openapi": "3.0.0", "paths": {}
        })))
        .mount(&mock_server)
        .await;

    let base = format!("{}/", mock_server.uri());
    let engine = DiscoveryEngine::new(base, Default::default(), Default::default(), 0.0);
    let result = engine.discover().await;

    assert_eq!(result.strategy, DiscoveryStrategy::OpenApi);
    assert!(result.spec_url.unwrap().ends_with("/openapi.json"));
}
