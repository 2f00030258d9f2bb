//! Core types for Tesseract schema flattening.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property keys that mark a tensor-encoded field.
///
/// Tesseract array dtypes are emitted in the OpenAPI document as an object
/// with these three properties. A field whose `properties` contain all of
/// them is rendered as an array input (or a plain number when its shape is
/// 0-dimensional, see [`crate::is_scalar_shape`]).
pub const TENSOR_KEYS: &[&str] = &["dtype", "shape", "data"];

/// Resolved type of a renderable field.
///
/// The first six variants mirror JSON Schema type tags. `Json` and
/// `Composite` are synthesized during resolution and never appear as
/// declared tags in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Integer,
    String,
    Boolean,
    Array,
    /// A propertyless `object` leaf. Passes through without a default or
    /// constraints.
    Object,
    /// A union touching a referenced object; rendered as free-form JSON text.
    Json,
    /// A nested object container. Anchors its children in the UI and is
    /// never a direct input.
    Composite,
}

impl FieldType {
    /// Parse a declared JSON Schema type tag.
    ///
    /// Returns `None` for unknown tags (caller should error) and for the
    /// synthesized `json`/`composite` variants, which are not part of the
    /// declared vocabulary.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "number" => Some(FieldType::Number),
            "integer" => Some(FieldType::Integer),
            "string" => Some(FieldType::String),
            "boolean" => Some(FieldType::Boolean),
            "array" => Some(FieldType::Array),
            "object" => Some(FieldType::Object),
            _ => None,
        }
    }

    /// Returns the lowercase tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Json => "json",
            FieldType::Composite => "composite",
        }
    }
}

/// Declared bounds for a numeric input.
///
/// Attached to a descriptor only when the schema node declares at least one
/// of `minimum`, `maximum`, or `multipleOf`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// The resolved, renderable unit of the flattened schema.
///
/// `ancestors` is the ordered chain of property keys from the document root
/// to this field (inclusive). It is never empty and defines both the field's
/// nesting and its identity; [`UiField`] derives all addressing strings
/// from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ancestors: Vec<String>,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_constraints: Option<NumberConstraints>,
    /// Only ever set on `string`-typed fields: true when the field's union
    /// also admitted a numeric member, so free text may parse as a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub could_be_number: Option<bool>,
}

/// A [`FieldDescriptor`] with `ancestors` replaced by derived UI addresses.
///
/// `uid` joins the ancestors with underscores, `key` with dots; `stem` is
/// the final ancestor. `container` and `parent_container` address the UI
/// element a field renders into and the one its parent produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiField {
    pub parent_container: String,
    pub container: String,
    pub uid: String,
    pub stem: String,
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_constraints: Option<NumberConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub could_be_number: Option<bool>,
}

/// Basic info about the Tesseract being interfaced, read once from the
/// document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TesseractMetadata {
    pub title: String,
    pub description: String,
    pub version: String,
}
