//! Reference resolution - inlines `$ref` indirection throughout a schema tree.
//!
//! The OpenAPI document served by a Tesseract factors shared models into
//! `components.schemas` and points at them with `$ref`. Downstream stages
//! want a self-contained tree, so resolution replaces each `$ref` node with
//! its referent, merged over the node's remaining sibling fields.
//!
//! The input is never mutated: every call returns a freshly built tree, so
//! the original document stays valid for reuse.
//!
//! Pointer cycles are not detected. A `$ref` chain that loops back through
//! an ancestor recurses until the stack overflows; Tesseract documents are
//! generated acyclic, and a depth guard here would reject legitimately deep
//! schemas.

use serde_json::{Map, Value};

use crate::error::ResolveError;

/// Recursively expand `$ref` pointers beneath `node`.
///
/// A node carrying `$ref` is replaced by its referent: the pointer is
/// resolved from the root of `document`, the target itself is resolved
/// (pointers may chain), and the target's fields are applied on top of the
/// node's remaining siblings. A sibling present on both keeps its position
/// but takes the referent's value; fields only the referent has are
/// appended. Nodes without `$ref` are rebuilt with every value resolved,
/// keys and order preserved.
///
/// # Errors
///
/// Returns `ResolveError::UnresolvedRef` if a pointer names a path segment
/// missing from `document`.
pub fn resolve_refs(node: &Value, document: &Value) -> Result<Value, ResolveError> {
    let Value::Object(map) = node else {
        return Ok(node.clone());
    };

    if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
        let target = navigate_pointer(document, pointer)?;
        let target = resolve_refs(&target, document)?;

        let mut merged = map.clone();
        merged.shift_remove("$ref");
        return match target {
            Value::Object(fields) => {
                for (key, value) in fields {
                    merged.insert(key, value);
                }
                Ok(Value::Object(merged))
            }
            // A pointer to a non-mapping value replaces the node wholesale.
            other => Ok(other),
        };
    }

    let mut resolved = Map::new();
    for (key, value) in map {
        resolved.insert(key.clone(), resolve_refs(value, document)?);
    }
    Ok(Value::Object(resolved))
}

/// Look up a `/`-delimited pointer from the root of `document`.
///
/// Leading `#` and `/` characters are stripped, so `#/components/schemas/X`
/// and `/components/schemas/X` address the same value. Each segment is an
/// object key lookup.
///
/// # Errors
///
/// Returns `ResolveError::UnresolvedRef` naming the first missing segment.
pub fn navigate_pointer(document: &Value, pointer: &str) -> Result<Value, ResolveError> {
    let path = pointer.trim_start_matches(['#', '/']);

    let mut current = document;
    for segment in path.split('/') {
        current = current
            .get(segment)
            .ok_or_else(|| ResolveError::UnresolvedRef {
                pointer: pointer.to_string(),
                segment: segment.to_string(),
            })?;
    }
    Ok(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn navigate_pointer_strips_fragment_prefix() {
        let document = json!({
            "components": { "schemas": { "Mesh": { "type": "object" } } }
        });
        let target = navigate_pointer(&document, "#/components/schemas/Mesh").unwrap();
        assert_eq!(target, json!({ "type": "object" }));

        let target = navigate_pointer(&document, "/components/schemas/Mesh").unwrap();
        assert_eq!(target, json!({ "type": "object" }));
    }

    #[test]
    fn navigate_pointer_missing_segment_errors() {
        let document = json!({ "components": { "schemas": {} } });
        let result = navigate_pointer(&document, "#/components/schemas/Missing");
        assert!(matches!(
            result,
            Err(ResolveError::UnresolvedRef { segment, .. }) if segment == "Missing"
        ));
    }

    #[test]
    fn resolve_refs_inlines_referent() {
        let document = json!({
            "components": {
                "schemas": {
                    "Age": { "type": "integer", "minimum": 0 }
                }
            }
        });
        let node = json!({ "$ref": "#/components/schemas/Age" });

        let resolved = resolve_refs(&node, &document).unwrap();
        assert_eq!(resolved, json!({ "type": "integer", "minimum": 0 }));
    }

    #[test]
    fn resolve_refs_referent_overrides_siblings() {
        let document = json!({
            "components": {
                "schemas": {
                    "Age": { "type": "integer", "default": 30 }
                }
            }
        });
        let node = json!({
            "$ref": "#/components/schemas/Age",
            "default": 18,
            "title": "Age"
        });

        let resolved = resolve_refs(&node, &document).unwrap();
        // Referent wins on collision; unrelated siblings survive.
        assert_eq!(resolved["default"], json!(30));
        assert_eq!(resolved["title"], json!("Age"));
        assert!(resolved.get("$ref").is_none());
    }

    #[test]
    fn resolve_refs_follows_chained_pointers() {
        let document = json!({
            "components": {
                "schemas": {
                    "Alias": { "$ref": "#/components/schemas/Real" },
                    "Real": { "type": "string" }
                }
            }
        });
        let node = json!({ "$ref": "#/components/schemas/Alias" });

        let resolved = resolve_refs(&node, &document).unwrap();
        assert_eq!(resolved, json!({ "type": "string" }));
    }

    #[test]
    fn resolve_refs_descends_into_nested_values() {
        let document = json!({
            "components": {
                "schemas": {
                    "Point": {
                        "type": "object",
                        "properties": { "x": { "type": "number" } }
                    }
                }
            }
        });
        let node = json!({
            "type": "object",
            "properties": {
                "origin": { "$ref": "#/components/schemas/Point" }
            }
        });

        let resolved = resolve_refs(&node, &document).unwrap();
        assert_eq!(
            resolved["properties"]["origin"]["properties"]["x"],
            json!({ "type": "number" })
        );
    }

    #[test]
    fn resolve_refs_preserves_key_order() {
        let document = json!({ "defs": { "D": { "type": "string" } } });
        let node = json!({
            "type": "object",
            "properties": {
                "first": { "type": "integer" },
                "second": { "$ref": "#/defs/D" },
                "third": { "type": "boolean" }
            }
        });

        let resolved = resolve_refs(&node, &document).unwrap();
        let keys: Vec<&String> = resolved["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["first", "second", "third"]);
    }

    #[test]
    fn resolve_refs_leaves_input_untouched() {
        let document = json!({ "defs": { "D": { "type": "string" } } });
        let node = json!({ "$ref": "#/defs/D", "title": "Name" });
        let before = node.clone();

        resolve_refs(&node, &document).unwrap();
        assert_eq!(node, before);
    }

    #[test]
    fn resolve_refs_passes_non_objects_through() {
        let document = json!({});
        assert_eq!(resolve_refs(&json!(42), &document).unwrap(), json!(42));
        assert_eq!(
            resolve_refs(&json!("text"), &document).unwrap(),
            json!("text")
        );
        assert_eq!(
            resolve_refs(&json!([1, 2]), &document).unwrap(),
            json!([1, 2])
        );
    }
}
