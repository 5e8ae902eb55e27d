//! `$ref` pointer resolution inside a spec document graph

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Resolve a schema's `$ref` pointer against the document root.
///
/// A schema without a pointer is returned unchanged. Pointers are local
/// (`#/components/schemas/Foo` style): the leading `#/` is stripped and
/// each segment is a nested lookup from the root. Chains of references
/// are followed; a broken pointer or a reference cycle resolves to an
/// empty object, so a partially specified document degrades to "no
/// fields for this endpoint" instead of aborting the walk.
pub fn resolve_ref(schema: &Value, document: &Value) -> Value {
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = schema;

    loop {
        let Some(pointer) = current.get("$ref").and_then(Value::as_str) else {
            return current.clone();
        };

        if !visited.insert(pointer.to_string()) {
            // Circular reference chain
            return Value::Object(Map::new());
        }

        match lookup_pointer(document, pointer) {
            Some(target) => current = target,
            None => return Value::Object(Map::new()),
        }
    }
}

/// Walk a `#/a/b/c` pointer from the document root
fn lookup_pointer<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    let path = pointer.strip_prefix("#/")?;

    let mut current = document;
    for segment in path.split('/') {
        current = current.get(segment)?;
    }
    Some(current)
}
