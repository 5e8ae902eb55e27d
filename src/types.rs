//! Common types used throughout restscout
//!
//! This module contains the value types a discovery run produces:
//! fields, query parameters, and endpoints. All entities are built once
//! per discovery call and never mutated afterwards; serialization is
//! owned by the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// SQL Type
// ============================================================================

/// SQL column type assigned to discovered fields
///
/// The SQL side of the connector only distinguishes these four types;
/// everything structured (objects, arrays) is serialized as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    /// Text, and the fallback for anything unrecognized
    #[default]
    Varchar,
    /// Whole numbers
    Integer,
    /// Floating point numbers
    Double,
    /// Booleans
    Boolean,
}

impl SqlType {
    /// Map an OpenAPI/JSON-Schema primitive type tag to a SQL type.
    ///
    /// The table is total: unrecognized tags fall back to VARCHAR.
    pub fn from_schema_type(type_tag: &str) -> Self {
        match type_tag {
            "integer" => SqlType::Integer,
            "number" => SqlType::Double,
            "boolean" => SqlType::Boolean,
            _ => SqlType::Varchar,
        }
    }

    /// Classify a live JSON value.
    ///
    /// Booleans must be tested before numbers: a JSON bool is
    /// representable as a numeric at the runtime level and would
    /// otherwise silently classify as INTEGER.
    pub fn from_json_value(value: &Value) -> Self {
        match value {
            Value::Bool(_) => SqlType::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => SqlType::Integer,
            Value::Number(_) => SqlType::Double,
            _ => SqlType::Varchar,
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlType::Varchar => write!(f, "VARCHAR"),
            SqlType::Integer => write!(f, "INTEGER"),
            SqlType::Double => write!(f, "DOUBLE"),
            SqlType::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

// ============================================================================
// Discovered Entities
// ============================================================================

/// A field of a discovered collection endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredField {
    /// Field name (flattened with `_` for nested objects)
    pub name: String,

    /// SQL column type
    #[serde(rename = "type")]
    pub sql_type: SqlType,

    /// Description from the spec document, empty when inferred
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl DiscoveredField {
    /// Create a new field
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            description: String::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A query parameter accepted by a discovered endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredQueryParam {
    /// Parameter name
    pub name: String,

    /// Schema type tag as declared by the spec (e.g. "string", "integer")
    #[serde(rename = "type")]
    pub param_type: String,

    /// Description from the spec document
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Whether the parameter is required
    #[serde(default)]
    pub required: bool,

    /// Allowed values, when the spec declares an enum
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    /// Default value, when the spec declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl DiscoveredQueryParam {
    /// Create a new query parameter
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: String::new(),
            required: false,
            enum_values: None,
            default: None,
        }
    }
}

/// A discovered collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredEndpoint {
    /// Endpoint name, derived from the path
    pub name: String,

    /// Path relative to the base URL
    pub path: String,

    /// HTTP method (always "GET"; discovery never probes writes)
    pub method: String,

    /// Fields of the returned records
    #[serde(default)]
    pub fields: Vec<DiscoveredField>,

    /// Query parameters the endpoint accepts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<DiscoveredQueryParam>,
}

impl DiscoveredEndpoint {
    /// Create a new GET endpoint with no fields or parameters yet
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            method: "GET".to_string(),
            fields: Vec::new(),
            query_params: Vec::new(),
        }
    }

    /// Set the fields
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<DiscoveredField>) -> Self {
        self.fields = fields;
        self
    }

    /// Set the query parameters
    #[must_use]
    pub fn with_query_params(mut self, params: Vec<DiscoveredQueryParam>) -> Self {
        self.query_params = params;
        self
    }
}

// ============================================================================
// Endpoint Naming
// ============================================================================

static VERSION_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/v\d+").expect("valid version segment regex"));

/// Derive an endpoint name from its path.
///
/// Strips a leading `/api` and/or `/vN` segment, replaces the remaining
/// `/` and `-` with `_`, and falls back to `"root"` for an empty result.
/// Names are deterministic and deliberately not deduplicated.
pub fn path_to_name(path: &str) -> String {
    let mut rest = path.trim();

    if let Some(stripped) = rest.strip_prefix("/api") {
        if stripped.is_empty() || stripped.starts_with('/') {
            rest = stripped;
        }
    }

    if let Some(m) = VERSION_SEGMENT.find(rest) {
        let tail = &rest[m.end()..];
        if tail.is_empty() || tail.starts_with('/') {
            rest = tail;
        }
    }

    let name = rest.replace(['/', '-'], "_");
    let name = name.trim_matches('_');
    if name.is_empty() {
        "root".to_string()
    } else {
        name.to_string()
    }
}
