//! Tesseract Schema Flattener
//!
//! Resolves the OpenAPI document served by a Tesseract and flattens its
//! arbitrarily nested input schema into an ordered, flat list of UI field
//! descriptors, ready for injection into a form renderer.
//!
//! The pipeline is pure and synchronous, leaves first: `$ref` indirection
//! is inlined, `anyOf` unions collapse to a single renderable type,
//! tensor-encoded fields with 0-dimensional shapes are unmasked as scalars,
//! and the resolved tree is walked depth-first into [`FieldDescriptor`]s.
//! Each descriptor carries its ancestor chain, from which [`UiField`]
//! derives stable, collision-free container identifiers.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tesseract_schema::{flatten_schema, FieldType, UiField};
//!
//! let schema = json!({
//!     "properties": {
//!         "person": {
//!             "type": "object",
//!             "properties": {
//!                 "age": { "type": "integer", "title": "Age", "minimum": 0 }
//!             }
//!         }
//!     }
//! });
//!
//! let fields = flatten_schema(schema["properties"].as_object().unwrap(), true).unwrap();
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields[0].field_type, FieldType::Composite);
//! assert_eq!(fields[1].ancestors, ["person", "age"]);
//!
//! // Containers always precede their contents, and every field's parent
//! // container is derivable from its own ancestor path.
//! let ui: Vec<UiField> = fields.iter().map(UiField::from_field).collect();
//! assert_eq!(ui[1].uid, "person_age");
//! assert_eq!(ui[1].parent_container, ui[0].container);
//! ```
//!
//! # Union resolution
//!
//! `anyOf` unions collapse by an ordered rule table (first match wins):
//!
//! | Union members | Resolved type |
//! |---------------|---------------|
//! | any `$ref` member | `json` |
//! | only `null` | error |
//! | one non-null member | that type |
//! | only `integer`/`number` | `number` |
//! | `array` + only `integer`/`number` | `array` |
//! | numeric member + anything else | `string`, `could_be_number` |
//! | anything else | `string` |
//!
//! A `null` member is removed first and marks the field optional.

mod document;
mod error;
mod flatten;
mod formatter;
mod loader;
mod paths;
mod resolver;
mod types;
mod udf;
mod union;
mod values;

pub use document::{
    build_payload, extract_metadata, parse_document, TemplatePayload, APPLY_INPUT_SCHEMA,
};
pub use error::{ExtractError, FlattenError, ResolveError, UdfError};
pub use flatten::flatten_schema;
pub use formatter::{format_field, is_scalar_shape};
pub use loader::{load_document, load_document_str};
pub use paths::ROOT_CONTAINER;
pub use resolver::{navigate_pointer, resolve_refs};
pub use types::{
    FieldDescriptor, FieldType, NumberConstraints, TesseractMetadata, UiField, TENSOR_KEYS,
};
pub use udf::{
    register_udfs, Backend, FuncDescription, FunctionDecl, UdfRegister, PLOTTER_RETURN_TYPES,
};
pub use union::{is_union, resolve_union, ResolvedUnion};
pub use values::{parse_json_or_string, try_parse_number};
