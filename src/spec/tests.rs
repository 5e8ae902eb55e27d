//! Tests for spec location, ref resolution, and parsing

use super::*;
use crate::http::HttpClient;
use crate::pagination::PaginationType;
use crate::types::SqlType;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Ref Resolution Tests
// ============================================================================

#[test]
fn test_resolve_ref_passthrough() {
    let document = json!({});
    let schema = json!({"type": "string"});
    assert_eq!(resolve_ref(&schema, &document), schema);
}

#[test]
fn test_resolve_ref_lookup() {
    let document = json!({
        "components": {
            "schemas": {
                "Market": {"type": "object", "properties": {"id": {"type": "integer"}}}
            }
        }
    });
    let schema = json!({"$ref": "#/components/schemas/Market"});

    let resolved = resolve_ref(&schema, &document);
    assert_eq!(resolved["type"], "object");
    assert_eq!(resolved["properties"]["id"]["type"], "integer");
}

#[test]
fn test_resolve_ref_chain() {
    let document = json!({
        "definitions": {
            "A": {"$ref": "#/definitions/B"},
            "B": {"type": "boolean"}
        }
    });

    let resolved = resolve_ref(&json!({"$ref": "#/definitions/A"}), &document);
    assert_eq!(resolved["type"], "boolean");
}

#[test]
fn test_resolve_ref_missing_hop_degrades_to_empty_object() {
    let document = json!({"components": {}});
    let schema = json!({"$ref": "#/components/schemas/Missing"});
    assert_eq!(resolve_ref(&schema, &document), json!({}));
}

#[test]
fn test_resolve_ref_external_pointer_degrades_to_empty_object() {
    let document = json!({});
    let schema = json!({"$ref": "other.json#/Foo"});
    assert_eq!(resolve_ref(&schema, &document), json!({}));
}

#[test]
fn test_resolve_ref_cycle_degrades_to_empty_object() {
    let document = json!({
        "definitions": {
            "A": {"$ref": "#/definitions/B"},
            "B": {"$ref": "#/definitions/A"}
        }
    });

    let resolved = resolve_ref(&json!({"$ref": "#/definitions/A"}), &document);
    assert_eq!(resolved, json!({}));
}

// ============================================================================
// Locator Tests
// ============================================================================

#[tokio::test]
async fn test_locator_finds_json_spec() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "openapi": "3.0.0", "info": {"title": "t"}, "paths": {}
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new();
    let base = mock_server.uri();
    let (document, url) = SpecLocator::new(&client, &base).locate().await.unwrap();

    assert_eq!(document["openapi"], "3.0.0");
    assert!(url.ends_with("/openapi.json"));
}

#[tokio::test]
async fn test_locator_falls_back_to_yaml() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.yaml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("openapi: 3.0.0\ninfo:\n  title: yaml api\npaths: {}\n"),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new();
    let base = mock_server.uri();
    let (document, url) = SpecLocator::new(&client, &base).locate().await.unwrap();

    assert_eq!(document["info"]["title"], "yaml api");
    assert!(url.ends_with("/openapi.yaml"));
}

#[tokio::test]
async fn test_locator_rejects_json_without_version_key() {
    let mock_server = MockServer::start().await;

    // A lucky path serving unrelated JSON must not be accepted
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hello": "world"})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new();
    let base = mock_server.uri();
    assert!(SpecLocator::new(&client, &base).locate().await.is_none());
}

#[tokio::test]
async fn test_locator_skips_failures_and_continues() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/swagger.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "swagger": "2.0", "paths": {}
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new();
    let base = mock_server.uri();
    let (document, url) = SpecLocator::new(&client, &base).locate().await.unwrap();

    assert_eq!(document["swagger"], "2.0");
    assert!(url.ends_with("/swagger.json"));
}

#[tokio::test]
async fn test_locator_total_failure_returns_none() {
    let mock_server = MockServer::start().await;
    // No mounts: every path 404s

    let client = HttpClient::new();
    let base = mock_server.uri();
    assert!(SpecLocator::new(&client, &base).locate().await.is_none());
}

// ============================================================================
// Parser Tests: OpenAPI 3.x
// ============================================================================

fn openapi3_doc() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {"title": "Exchange API", "description": "Market data"},
        "paths": {
            "/v1/markets": {
                "get": {
                    "parameters": [
                        {"name": "cursor", "in": "query", "schema": {"type": "string"},
                         "description": "opaque continuation token"},
                        {"name": "limit", "in": "query", "required": false,
                         "schema": {"type": "integer", "default": 50}},
                        {"name": "status", "in": "query",
                         "schema": {"type": "string", "enum": ["open", "closed"]}}
                    ],
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": {"$ref": "#/components/schemas/Market"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/v1/markets/{id}": {
                "get": {"responses": {"200": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/Market"}}}}}}
            },
            "/v1/markets/{id}/trades": {
                "get": {"responses": {}}
            }
        },
        "components": {
            "schemas": {
                "Market": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "integer", "description": "market id"},
                        "symbol": {"type": "string"},
                        "price": {"type": "number"},
                        "active": {"type": "boolean"},
                        "metadata": {"type": "object"}
                    }
                }
            }
        }
    })
}

#[test]
fn test_parse_openapi3_array_with_ref() {
    let parsed = SpecParser::parse(&openapi3_doc()).unwrap();

    assert_eq!(parsed.title, "Exchange API");
    assert_eq!(parsed.description, "Market data");
    assert_eq!(parsed.endpoints.len(), 1);

    let endpoint = &parsed.endpoints[0];
    assert_eq!(endpoint.name, "markets");
    assert_eq!(endpoint.path, "/v1/markets");
    assert_eq!(endpoint.method, "GET");

    // Fields equal the referenced schema's property keys, each mapped
    // through the type table
    let by_name: std::collections::HashMap<&str, SqlType> = endpoint
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.sql_type))
        .collect();
    assert_eq!(by_name.len(), 5);
    assert_eq!(by_name["id"], SqlType::Integer);
    assert_eq!(by_name["symbol"], SqlType::Varchar);
    assert_eq!(by_name["price"], SqlType::Double);
    assert_eq!(by_name["active"], SqlType::Boolean);
    assert_eq!(by_name["metadata"], SqlType::Varchar);

    let id_field = endpoint.fields.iter().find(|f| f.name == "id").unwrap();
    assert_eq!(id_field.description, "market id");
}

#[test]
fn test_parse_skips_parameterized_paths() {
    let parsed = SpecParser::parse(&openapi3_doc()).unwrap();
    assert!(parsed.endpoints.iter().all(|e| !e.path.contains('{')));
}

#[test]
fn test_parse_collects_query_params_only() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/users": {
                "get": {
                    "parameters": [
                        {"name": "limit", "in": "query", "schema": {"type": "integer"}},
                        {"name": "X-Trace", "in": "header", "schema": {"type": "string"}},
                        {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}
                    ],
                    "responses": {}
                }
            }
        }
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    let params = &parsed.endpoints[0].query_params;
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "limit");
    assert_eq!(params[0].param_type, "integer");
}

#[test]
fn test_parse_query_param_enum_and_default() {
    let parsed = SpecParser::parse(&openapi3_doc()).unwrap();
    let params = &parsed.endpoints[0].query_params;

    let status = params.iter().find(|p| p.name == "status").unwrap();
    assert_eq!(
        status.enum_values,
        Some(vec!["open".to_string(), "closed".to_string()])
    );

    let limit = params.iter().find(|p| p.name == "limit").unwrap();
    assert_eq!(limit.default, Some(json!(50)));
    assert!(!limit.required);
}

#[test]
fn test_parse_no_response_schema_yields_zero_fields() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {"/ping": {"get": {"responses": {}}}}
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    assert_eq!(parsed.endpoints.len(), 1);
    assert_eq!(parsed.endpoints[0].name, "ping");
    assert!(parsed.endpoints[0].fields.is_empty());
}

#[test]
fn test_parse_wrapped_array_response() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/orders": {
                "get": {
                    "responses": {"200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {
                            "orders": {
                                "type": "array",
                                "items": {"type": "object", "properties": {
                                    "id": {"type": "integer"}
                                }}
                            },
                            "total": {"type": "integer"}
                        }
                    }}}}}
                }
            }
        }
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    let endpoint = &parsed.endpoints[0];

    assert_eq!(endpoint.fields.len(), 1);
    assert_eq!(endpoint.fields[0].name, "id");
    // The wrapping property becomes the pagination data field
    assert_eq!(parsed.pagination.data_field.as_deref(), Some("orders"));
}

#[test]
fn test_parse_bare_object_response_uses_own_properties() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/status": {
                "get": {
                    "responses": {"200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {
                            "healthy": {"type": "boolean"},
                            "uptime": {"type": "integer"}
                        }
                    }}}}}
                }
            }
        }
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    let names: Vec<&str> = parsed.endpoints[0]
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"healthy"));
    assert!(names.contains(&"uptime"));
}

// ============================================================================
// Parser Tests: Swagger 2.0
// ============================================================================

fn swagger2_doc() -> Value {
    json!({
        "swagger": "2.0",
        "info": {"title": "Legacy API"},
        "paths": {
            "/api/v2/orders": {
                "get": {
                    "parameters": [
                        {"name": "offset", "in": "query", "type": "integer"},
                        {"name": "limit", "in": "query", "type": "integer"}
                    ],
                    "responses": {
                        "200": {"schema": {
                            "type": "array",
                            "items": {"$ref": "#/definitions/Order"}
                        }}
                    }
                },
                "post": {"responses": {}}
            },
            "/api/v2/orders/{id}": {
                "get": {"responses": {"200": {"schema": {"$ref": "#/definitions/Order"}}}}
            }
        },
        "definitions": {
            "Order": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "amount": {"type": "number"}
                }
            }
        }
    })
}

#[test]
fn test_parse_swagger2_response_schema_location() {
    let parsed = SpecParser::parse(&swagger2_doc()).unwrap();

    assert_eq!(parsed.title, "Legacy API");
    assert_eq!(parsed.endpoints.len(), 1);

    let endpoint = &parsed.endpoints[0];
    assert_eq!(endpoint.name, "orders");
    assert_eq!(endpoint.fields.len(), 2);

    let params = &endpoint.query_params;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].param_type, "integer");
}

#[test]
fn test_parse_swagger2_offset_pagination() {
    let parsed = SpecParser::parse(&swagger2_doc()).unwrap();
    assert_eq!(parsed.pagination.pagination_type, PaginationType::Offset);
    assert_eq!(parsed.pagination.page_size_param.as_deref(), Some("limit"));
}

// ============================================================================
// Parser Tests: Pagination Pooling
// ============================================================================

#[test]
fn test_cursor_param_detected_from_pool() {
    let parsed = SpecParser::parse(&openapi3_doc()).unwrap();
    assert_eq!(parsed.pagination.pagination_type, PaginationType::Cursor);
    assert_eq!(parsed.pagination.cursor_param.as_deref(), Some("cursor"));
}

#[test]
fn test_cursor_param_beats_offset() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/a": {"get": {"parameters": [
                {"name": "offset", "in": "query", "schema": {"type": "integer"}}
            ], "responses": {}}},
            "/b": {"get": {"parameters": [
                {"name": "starting_after", "in": "query", "schema": {"type": "string"}}
            ], "responses": {}}}
        }
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    assert_eq!(parsed.pagination.pagination_type, PaginationType::Cursor);
    assert_eq!(
        parsed.pagination.cursor_param.as_deref(),
        Some("starting_after")
    );
}

#[test]
fn test_page_param_is_offset_style() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/things": {
                "get": {
                    "parameters": [
                        {"name": "page", "in": "query", "schema": {"type": "integer"}},
                        {"name": "per_page", "in": "query", "schema": {"type": "integer"}}
                    ],
                    "responses": {}
                }
            }
        }
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    assert_eq!(parsed.pagination.pagination_type, PaginationType::Offset);
    assert_eq!(parsed.pagination.page_size_param.as_deref(), Some("per_page"));
}

#[test]
fn test_no_pagination_params_is_none() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/things": {
                "get": {
                    "parameters": [{"name": "q", "in": "query", "schema": {"type": "string"}}],
                    "responses": {}
                }
            }
        }
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    assert!(parsed.pagination.is_none());
}

#[test]
fn test_wrapper_rescan_covers_detail_routes() {
    // Only the detail route exhibits the wrap pattern; the collection
    // endpoint extraction never sees it, so the fallback scan must.
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/things": {"get": {"responses": {}}},
            "/things/{id}/children": {
                "get": {
                    "responses": {"200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {
                            "children": {"type": "array", "items": {"type": "object"}}
                        }
                    }}}}}
                }
            }
        }
    });

    let parsed = SpecParser::parse(&doc).unwrap();
    assert_eq!(parsed.pagination.data_field.as_deref(), Some("children"));
}

// ============================================================================
// Parser Tests: Error Cases
// ============================================================================

#[test]
fn test_parse_rejects_unversioned_document() {
    let err = SpecParser::parse(&json!({"paths": {}})).unwrap_err();
    assert!(err.to_string().contains("neither an openapi nor a swagger key"));
}

#[test]
fn test_parse_rejects_document_without_paths() {
    let err = SpecParser::parse(&json!({"openapi": "3.0.0"})).unwrap_err();
    assert!(err.to_string().contains("no paths object"));
}

#[test]
fn test_parse_empty_paths_yields_zero_endpoints() {
    let parsed = SpecParser::parse(&json!({"openapi": "3.0.0", "paths": {}})).unwrap();
    assert!(parsed.endpoints.is_empty());
    assert!(parsed.pagination.is_none());
}
