//! Spec document walking
//!
//! Turns a resolved OpenAPI 3.x or Swagger 2.0 document into discovered
//! endpoints, fields, query parameters, and a pagination signal.

use super::refs::resolve_ref;
use crate::error::{Error, Result};
use crate::pagination::{DiscoveredPagination, CURSOR_KEYS};
use crate::types::{path_to_name, DiscoveredEndpoint, DiscoveredField, DiscoveredQueryParam, SqlType};
use indexmap::IndexSet;
use serde_json::Value;
use tracing::debug;

/// Parameter names that control page size, in preference order
const PAGE_SIZE_PARAM_NAMES: &[&str] = &["limit", "per_page"];

/// Output of parsing a located spec document
#[derive(Debug, Clone)]
pub struct ParsedSpec {
    /// API title from the info block
    pub title: String,
    /// API description from the info block
    pub description: String,
    /// Discovered collection endpoints
    pub endpoints: Vec<DiscoveredEndpoint>,
    /// Document-level pagination signal
    pub pagination: DiscoveredPagination,
}

/// Which contract dialect the document speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecVersion {
    /// OpenAPI 3.x: response schemas under `content.<media>.schema`,
    /// parameter types under `schema`
    OpenApi3,
    /// Swagger 2.0: response schemas directly under `schema`,
    /// parameter types on the parameter itself
    Swagger2,
}

/// Walks a spec document's path items into endpoints
pub struct SpecParser;

impl SpecParser {
    /// Parse a located document.
    ///
    /// Paths containing a `{param}` segment are single-resource detail
    /// routes, never collections, and are skipped; so is every operation
    /// other than GET. A GET with no discoverable response schema still
    /// produces an endpoint with zero fields.
    pub fn parse(document: &Value) -> Result<ParsedSpec> {
        let version = Self::sniff_version(document)?;

        let info = document.get("info");
        let title = Self::info_str(info, "title");
        let description = Self::info_str(info, "description");

        let paths = document
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::spec_parse("document has no paths object"))?;

        let mut endpoints = Vec::new();
        let mut pooled_params: IndexSet<String> = IndexSet::new();
        let mut data_field: Option<String> = None;

        for (path, item) in paths {
            if path.contains('{') {
                continue;
            }
            let Some(operation) = item.get("get") else {
                continue;
            };

            let (fields, wrapper) = Self::response_fields(operation, version, document);
            if data_field.is_none() {
                data_field = wrapper;
            }

            let query_params = Self::query_params(operation, version, document);
            for param in &query_params {
                pooled_params.insert(param.name.clone());
            }

            debug!("spec path {path}: {} fields, {} query params", fields.len(), query_params.len());
            endpoints.push(
                DiscoveredEndpoint::new(path_to_name(path), path)
                    .with_fields(fields)
                    .with_query_params(query_params),
            );
        }

        // Pagination is resolved once per document from the pooled
        // query-parameter names, not per endpoint.
        let mut pagination = Self::pagination_from_params(&pooled_params);
        if data_field.is_none() {
            data_field = Self::scan_for_wrapper(document, version);
        }
        pagination.data_field = data_field;

        Ok(ParsedSpec {
            title,
            description,
            endpoints,
            pagination,
        })
    }

    fn sniff_version(document: &Value) -> Result<SpecVersion> {
        if document.get("swagger").is_some() {
            Ok(SpecVersion::Swagger2)
        } else if document.get("openapi").is_some() {
            Ok(SpecVersion::OpenApi3)
        } else {
            Err(Error::spec_parse(
                "document has neither an openapi nor a swagger key",
            ))
        }
    }

    fn info_str(info: Option<&Value>, key: &str) -> String {
        info.and_then(|i| i.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    // ========================================================================
    // Response Schemas
    // ========================================================================

    /// Locate the success response schema of a GET operation
    fn success_schema<'a>(operation: &'a Value, version: SpecVersion) -> Option<&'a Value> {
        let responses = operation.get("responses")?;
        let response = responses.get("200").or_else(|| responses.get("default"))?;

        match version {
            SpecVersion::OpenApi3 => {
                let content = response.get("content")?;
                let media = content.get("application/json").or_else(|| {
                    content.as_object().and_then(|m| m.values().next())
                })?;
                media.get("schema")
            }
            SpecVersion::Swagger2 => response.get("schema"),
        }
    }

    /// Extract the fields of a GET operation's success response, along
    /// with the data-wrapping property name when the response nests its
    /// result array.
    fn response_fields(
        operation: &Value,
        version: SpecVersion,
        document: &Value,
    ) -> (Vec<DiscoveredField>, Option<String>) {
        let Some(schema) = Self::success_schema(operation, version) else {
            return (Vec::new(), None);
        };
        let schema = resolve_ref(schema, document);
        Self::schema_fields(&schema, document)
    }

    /// Classify a response schema and pull out record fields.
    ///
    /// Three accepted shapes: a bare array (fields come from the element
    /// schema), an object wrapping exactly one array-typed property
    /// (fields come from that array's elements, and the property name is
    /// the data-field candidate), or a bare object (its own properties).
    fn schema_fields(schema: &Value, document: &Value) -> (Vec<DiscoveredField>, Option<String>) {
        if schema.get("type").and_then(Value::as_str) == Some("array") {
            let fields = schema
                .get("items")
                .map(|items| Self::object_fields(&resolve_ref(items, document), document))
                .unwrap_or_default();
            return (fields, None);
        }

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            let array_props: Vec<(&String, Value)> = properties
                .iter()
                .map(|(name, prop)| (name, resolve_ref(prop, document)))
                .filter(|(_, prop)| prop.get("type").and_then(Value::as_str) == Some("array"))
                .collect();

            if let [(wrapper, array_schema)] = array_props.as_slice() {
                let fields = array_schema
                    .get("items")
                    .map(|items| Self::object_fields(&resolve_ref(items, document), document))
                    .unwrap_or_default();
                return (fields, Some((*wrapper).clone()));
            }

            return (Self::properties_to_fields(properties, document), None);
        }

        (Vec::new(), None)
    }

    /// Fields of an object schema; empty when it declares no properties
    fn object_fields(schema: &Value, document: &Value) -> Vec<DiscoveredField> {
        schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| Self::properties_to_fields(properties, document))
            .unwrap_or_default()
    }

    fn properties_to_fields(
        properties: &serde_json::Map<String, Value>,
        document: &Value,
    ) -> Vec<DiscoveredField> {
        properties
            .iter()
            .map(|(name, prop)| {
                let prop = resolve_ref(prop, document);
                let type_tag = prop.get("type").and_then(Value::as_str).unwrap_or("string");
                let description = prop
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                DiscoveredField::new(name, SqlType::from_schema_type(type_tag))
                    .with_description(description)
            })
            .collect()
    }

    // ========================================================================
    // Query Parameters
    // ========================================================================

    /// Collect an operation's query parameters; path parameters are
    /// excluded by the `in == "query"` filter.
    fn query_params(
        operation: &Value,
        version: SpecVersion,
        document: &Value,
    ) -> Vec<DiscoveredQueryParam> {
        let Some(params) = operation.get("parameters").and_then(Value::as_array) else {
            return Vec::new();
        };

        params
            .iter()
            .map(|param| resolve_ref(param, document))
            .filter(|param| param.get("in").and_then(Value::as_str) == Some("query"))
            .map(|param| Self::query_param(&param, version))
            .collect()
    }

    fn query_param(param: &Value, version: SpecVersion) -> DiscoveredQueryParam {
        let name = param
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let description = param
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let required = param
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        // OpenAPI 3 nests type/enum/default under `schema`; Swagger 2
        // puts them on the parameter itself.
        let holder = match version {
            SpecVersion::OpenApi3 => param.get("schema").cloned().unwrap_or_default(),
            SpecVersion::Swagger2 => param.clone(),
        };

        let param_type = holder
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("string")
            .to_string();
        let enum_values = holder.get("enum").and_then(Value::as_array).map(|values| {
            values.iter().map(enum_value_to_string).collect()
        });
        let default = holder.get("default").cloned();

        let mut query_param = DiscoveredQueryParam::new(name, param_type);
        query_param.description = description.to_string();
        query_param.required = required;
        query_param.enum_values = enum_values;
        query_param.default = default;
        query_param
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Classify pagination from the pooled query-parameter names.
    ///
    /// Cursor names win over `offset`, which wins over `page` (treated
    /// as offset-style); ties within a category break by first-seen
    /// order across the document.
    fn pagination_from_params(pooled: &IndexSet<String>) -> DiscoveredPagination {
        if let Some(name) = pooled
            .iter()
            .find(|name| CURSOR_KEYS.contains(&name.as_str()))
        {
            return DiscoveredPagination::cursor().with_cursor_param(name.clone());
        }

        if pooled.contains("offset") || pooled.contains("page") {
            let mut pagination = DiscoveredPagination::offset();
            if let Some(name) = pooled
                .iter()
                .find(|name| PAGE_SIZE_PARAM_NAMES.contains(&name.as_str()))
            {
                pagination = pagination.with_page_size_param(name.clone());
            }
            return pagination;
        }

        DiscoveredPagination::none()
    }

    /// Fallback scan for the data-wrapping property when field extraction
    /// did not surface one. Unlike endpoint extraction this also inspects
    /// detail routes, which can reveal the wrap pattern on their own.
    fn scan_for_wrapper(document: &Value, version: SpecVersion) -> Option<String> {
        let paths = document.get("paths").and_then(Value::as_object)?;

        for item in paths.values() {
            let Some(operation) = item.get("get") else {
                continue;
            };
            let (_, wrapper) = Self::response_fields(operation, version, document);
            if wrapper.is_some() {
                return wrapper;
            }
        }
        None
    }
}

fn enum_value_to_string(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
