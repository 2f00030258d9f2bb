//! Union type resolution - collapses `anyOf` members into one renderable type.
//!
//! Pydantic-generated Tesseract schemas express optional and multi-type
//! inputs as `anyOf` unions. A form renderer needs a single widget per
//! field, so each union is narrowed to one [`FieldType`] plus two flags:
//! whether the union admitted null (the field is optional) and, for string
//! results, whether a numeric member means free text may parse as a number.
//!
//! The narrowing is lossy on purpose: a union mixing an object reference
//! with scalars cannot be rendered more precisely than free-form JSON, and
//! heterogeneous non-numeric scalars collapse to free text.

use serde_json::{Map, Value};

use crate::error::FlattenError;
use crate::types::FieldType;

/// Outcome of collapsing an `anyOf` union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedUnion {
    pub field_type: FieldType,
    pub optional: bool,
    pub could_be_number: bool,
}

/// Whether a schema node is a union: it lists `anyOf` members and declares
/// no direct `type`.
pub fn is_union(node: &Map<String, Value>) -> bool {
    node.contains_key("anyOf") && !node.contains_key("type")
}

/// Collapse an `anyOf` union into a single renderable type.
///
/// The rules form an ordered decision table; the first match wins:
///
/// 1. A null member is removed and recorded as `optional`.
/// 2. Any member that is a reference (`$ref`, no direct `type`) forces the
///    whole union to `json`.
/// 3. No members besides null is a malformed union and fails.
/// 4. Exactly one remaining member resolves to its type verbatim.
/// 5. Members all in `{integer, number}` resolve to `number`.
/// 6. `array` plus otherwise only `{integer, number}` resolves to `array`.
/// 7. A numeric member among anything else resolves to `string` with
///    `could_be_number` set.
/// 8. Anything else resolves to `string`.
///
/// # Errors
///
/// Returns `FlattenError::NullOnlyUnion` when no non-null members remain,
/// naming the offending node; never falls back to a guessed type. A lone
/// member with an unrecognized type tag is `FlattenError::UnknownType`.
pub fn resolve_union(node: &Map<String, Value>, path: &str) -> Result<ResolvedUnion, FlattenError> {
    let members = match node.get("anyOf").and_then(Value::as_array) {
        Some(members) => members.as_slice(),
        None => &[],
    };

    let mut tags: Vec<&str> = Vec::new();
    let mut has_composite = false;
    let mut has_number = false;

    for member in members {
        if let Some(tag) = member.get("type").and_then(Value::as_str) {
            tags.push(tag);
            if matches!(tag, "integer" | "number") {
                has_number = true;
            }
        } else if member.get("$ref").is_some() {
            has_composite = true;
        }
    }

    let optional = tags.contains(&"null");
    tags.retain(|tag| *tag != "null");

    if has_composite {
        // A union touching a referenced object cannot be narrowed further.
        return Ok(ResolvedUnion {
            field_type: FieldType::Json,
            optional,
            could_be_number: false,
        });
    }

    if tags.is_empty() {
        return Err(FlattenError::NullOnlyUnion {
            path: path.to_string(),
        });
    }

    if let [tag] = tags.as_slice() {
        let field_type = FieldType::parse(tag).ok_or_else(|| FlattenError::UnknownType {
            path: path.to_string(),
            type_tag: tag.to_string(),
        })?;
        return Ok(ResolvedUnion {
            field_type,
            optional,
            could_be_number: false,
        });
    }

    if tags.iter().all(|tag| matches!(*tag, "integer" | "number")) {
        return Ok(ResolvedUnion {
            field_type: FieldType::Number,
            optional,
            could_be_number: false,
        });
    }

    if tags.contains(&"array")
        && tags
            .iter()
            .filter(|tag| **tag != "array")
            .all(|tag| matches!(*tag, "integer" | "number"))
    {
        return Ok(ResolvedUnion {
            field_type: FieldType::Array,
            optional,
            could_be_number: false,
        });
    }

    Ok(ResolvedUnion {
        field_type: FieldType::String,
        optional,
        could_be_number: has_number,
    })
}
