//! Field formatting - builds one renderable descriptor per schema node.
//!
//! Combines union narrowing and tensor-scalar classification to turn a
//! resolved schema node into a [`FieldDescriptor`]. Branching follows the
//! node's structure: no `properties` means a primitive leaf, the
//! `dtype`/`shape`/`data` property set means a tensor-encoded array (or a
//! disguised scalar), and any other `properties` mapping is a composite
//! container that only anchors its children.

use serde_json::{Map, Value};

use crate::error::FlattenError;
use crate::types::{FieldDescriptor, FieldType, NumberConstraints, TENSOR_KEYS};
use crate::union::{is_union, resolve_union};

/// Whether a tensor shape sub-schema describes a 0-dimensional array.
///
/// Tesseract array dtypes may be used unwrapped (`Float32` rather than
/// `Array[Float32]`). The document then marks the field up as an array, but
/// the Tesseract expects a scalar. A shape constrained to exactly zero
/// items gives it away: both `minItems` and `maxItems` must be present and
/// zero.
pub fn is_scalar_shape(shape: &Value) -> bool {
    let min_items = shape.get("minItems").and_then(Value::as_u64);
    let max_items = shape.get("maxItems").and_then(Value::as_u64);
    matches!((min_items, max_items), (Some(0), Some(0)))
}

/// Format a resolved schema node as a renderable field descriptor.
///
/// `ancestors` is the chain of property keys the node is nested beneath;
/// the descriptor's own path appends `key` to it. With `use_title` set,
/// leaves display their declared `title` and containers a humanized form of
/// their key; otherwise the raw key is used throughout.
///
/// A required plain string leaf with no declared default is given an empty
/// string, so the rendered input never starts out valueless. Numeric leaves
/// carry [`NumberConstraints`] only when the node declares at least one of
/// `minimum`, `maximum`, or `multipleOf`.
///
/// # Errors
///
/// Propagates union failures from [`resolve_union`]; a leaf declaring
/// neither `type`, `anyOf`, nor `properties` is `FlattenError::MissingType`.
pub fn format_field(
    key: &str,
    node: &Value,
    ancestors: &[String],
    use_title: bool,
) -> Result<FieldDescriptor, FlattenError> {
    let path = field_path(ancestors, key);
    let Some(map) = node.as_object() else {
        return Err(FlattenError::MissingType { path });
    };

    let mut optional = false;
    let mut could_be_number = false;
    let declared_type = if is_union(map) {
        let resolved = resolve_union(map, &path)?;
        optional = resolved.optional;
        could_be_number = resolved.could_be_number;
        Some(resolved.field_type)
    } else {
        match map.get("type").and_then(Value::as_str) {
            Some(tag) => Some(FieldType::parse(tag).ok_or_else(|| FlattenError::UnknownType {
                path: path.clone(),
                type_tag: tag.to_string(),
            })?),
            None => None,
        }
    };

    let description = map
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let mut field_ancestors = ancestors.to_vec();
    field_ancestors.push(key.to_string());

    let Some(properties) = map.get("properties").and_then(Value::as_object) else {
        let field_type = declared_type.ok_or(FlattenError::MissingType { path })?;
        let title = if use_title {
            map.get("title")
                .and_then(Value::as_str)
                .unwrap_or(key)
                .to_string()
        } else {
            key.to_string()
        };

        let mut field = FieldDescriptor {
            field_type,
            title,
            description,
            ancestors: field_ancestors,
            optional,
            default: None,
            number_constraints: None,
            could_be_number: (field_type == FieldType::String).then_some(could_be_number),
        };

        if field_type != FieldType::Object {
            field.default = match declared_default(map) {
                // A required plain string must not start out valueless.
                None if field_type == FieldType::String && !could_be_number && !optional => {
                    Some(Value::String(String::new()))
                }
                other => other,
            };
            if matches!(field_type, FieldType::Number | FieldType::Integer) {
                field.number_constraints = declared_constraints(map);
            }
        }
        return Ok(field);
    };

    // Nodes with properties display their key, not the declared title.
    let title = if use_title {
        key_to_title(key)
    } else {
        key.to_string()
    };

    if TENSOR_KEYS.iter().all(|tensor_key| properties.contains_key(*tensor_key)) {
        let scalar = properties.get("shape").is_some_and(is_scalar_shape);
        if scalar {
            return Ok(FieldDescriptor {
                field_type: FieldType::Number,
                title,
                description,
                ancestors: field_ancestors,
                optional,
                default: declared_default(map),
                number_constraints: declared_constraints(map),
                could_be_number: None,
            });
        }
        return Ok(FieldDescriptor {
            field_type: FieldType::Array,
            title,
            description,
            ancestors: field_ancestors,
            optional,
            default: None,
            number_constraints: None,
            could_be_number: None,
        });
    }

    Ok(FieldDescriptor {
        field_type: FieldType::Composite,
        title,
        description,
        ancestors: field_ancestors,
        optional,
        default: None,
        number_constraints: None,
        could_be_number: None,
    })
}

/// Slash-delimited node path for error messages.
fn field_path(ancestors: &[String], key: &str) -> String {
    let mut path = String::new();
    for ancestor in ancestors {
        path.push('/');
        path.push_str(ancestor);
    }
    path.push('/');
    path.push_str(key);
    path
}

/// The node's declared default, with JSON null treated as absent.
fn declared_default(map: &Map<String, Value>) -> Option<Value> {
    map.get("default").filter(|value| !value.is_null()).cloned()
}

/// Declared numeric bounds, or `None` when the node declares none.
fn declared_constraints(map: &Map<String, Value>) -> Option<NumberConstraints> {
    let declares_any = ["minimum", "maximum", "multipleOf"]
        .iter()
        .any(|bound| map.contains_key(*bound));
    if !declares_any {
        return None;
    }
    Some(NumberConstraints {
        min_value: map.get("minimum").and_then(Value::as_f64),
        max_value: map.get("maximum").and_then(Value::as_f64),
        step: map.get("multipleOf").and_then(Value::as_f64),
    })
}

/// Humanize a property key for display: underscores become spaces and each
/// word is title-cased.
fn key_to_title(key: &str) -> String {
    let mut title = String::with_capacity(key.len());
    let mut prev_alphabetic = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alphabetic {
                title.extend(ch.to_lowercase());
            } else {
                title.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            title.push(ch);
            prev_alphabetic = false;
        }
    }
    title
}
