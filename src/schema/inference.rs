//! Schema inference from live JSON samples

use crate::types::{DiscoveredField, JsonObject, SqlType};
use indexmap::IndexMap;
use serde_json::Value;

/// Schema inferrer with configuration options
#[derive(Debug, Clone)]
pub struct SchemaInferencer {
    /// Maximum depth for nested object flattening
    max_depth: usize,
}

impl Default for SchemaInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInferencer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self { max_depth: 10 }
    }

    /// Set maximum depth for nested object flattening
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Infer a field→type map from a sample of response objects.
    ///
    /// The sample may be non-uniform: rows missing a field or carrying a
    /// null simply leave the field's VARCHAR placeholder in place, and a
    /// later row with a concrete value promotes it. Field order is the
    /// order fields were first seen across the sample.
    pub fn infer(&self, rows: &[Value]) -> IndexMap<String, SqlType> {
        let mut schema = IndexMap::new();

        for row in rows {
            if let Value::Object(map) = row {
                self.merge_object(&mut schema, "", map, 0);
            }
        }

        schema
    }

    /// Infer fields from a sample of response objects
    pub fn infer_fields(&self, rows: &[Value]) -> Vec<DiscoveredField> {
        self.infer(rows)
            .into_iter()
            .map(|(name, sql_type)| DiscoveredField::new(name, sql_type))
            .collect()
    }

    /// Merge one object's keys into the accumulated schema
    fn merge_object(
        &self,
        schema: &mut IndexMap<String, SqlType>,
        prefix: &str,
        map: &JsonObject,
        depth: usize,
    ) {
        for (key, value) in map {
            let name = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}_{key}")
            };

            match value {
                // Nested objects flatten with a `_` join; nested arrays
                // never descend further and classify as VARCHAR below.
                Value::Object(nested) if depth < self.max_depth => {
                    self.merge_object(schema, &name, nested, depth + 1);
                }
                _ => {
                    merge_type(schema, name, SqlType::from_json_value(value));
                }
            }
        }
    }
}

/// Apply the asymmetric promotion rule.
///
/// VARCHAR is the unknown placeholder (nulls, missing values, strings):
/// a later row may promote it to a concrete type, but a concrete type is
/// never demoted back to VARCHAR. This decides the final type whenever
/// rows disagree.
fn merge_type(schema: &mut IndexMap<String, SqlType>, name: String, observed: SqlType) {
    match schema.entry(name) {
        indexmap::map::Entry::Occupied(mut entry) => {
            if *entry.get() == SqlType::Varchar && observed != SqlType::Varchar {
                entry.insert(observed);
            }
        }
        indexmap::map::Entry::Vacant(entry) => {
            entry.insert(observed);
        }
    }
}

/// Infer fields from a sample of response objects (convenience function)
pub fn infer_schema(rows: &[Value]) -> Vec<DiscoveredField> {
    SchemaInferencer::new().infer_fields(rows)
}
