//! Schema flattening - walks a resolved tree into an ordered flat list.
//!
//! The renderer consumes a flat list rather than a nested tree; nesting is
//! preserved through each descriptor's ancestor chain. The walk is
//! depth-first in document order: a composite's descriptor is always
//! emitted immediately before its children, so container UI elements exist
//! before their contents render, and every composite's children are
//! contiguous in the output.

use serde_json::{Map, Value};

use crate::error::FlattenError;
use crate::formatter::format_field;
use crate::types::{FieldDescriptor, FieldType};

/// Flatten a resolved `properties` mapping into field descriptors.
///
/// Emission order equals the mapping's insertion order at every nesting
/// level; nothing is resorted.
///
/// # Errors
///
/// Propagates formatting failures from [`format_field`].
pub fn flatten_schema(
    properties: &Map<String, Value>,
    use_title: bool,
) -> Result<Vec<FieldDescriptor>, FlattenError> {
    let mut fields = Vec::new();
    flatten_into(properties, &[], use_title, &mut fields)?;
    Ok(fields)
}

fn flatten_into(
    properties: &Map<String, Value>,
    ancestors: &[String],
    use_title: bool,
    accum: &mut Vec<FieldDescriptor>,
) -> Result<(), FlattenError> {
    for (key, node) in properties {
        let field = format_field(key, node, ancestors, use_title)?;
        let is_composite = field.field_type == FieldType::Composite;
        let child_ancestors = field.ancestors.clone();
        accum.push(field);

        if is_composite {
            // A composite descriptor always comes from a node with properties.
            if let Some(child_properties) = node.get("properties").and_then(Value::as_object) {
                flatten_into(child_properties, &child_ancestors, use_title, accum)?;
            }
        }
    }
    Ok(())
}
