//! Full-document extraction: metadata, flattened schema, render payload.
//!
//! A Tesseract serves an OpenAPI 3.x document whose `components.schemas`
//! contain the apply-endpoint input schema. This module ties the pipeline
//! together: read the header metadata, resolve the input schema's `$ref`
//! indirection, flatten it into UI fields, and merge in the user-defined
//! function registry to form the complete render payload.
//!
//! Everything here is a pure transform over an in-memory document; fetching
//! the document and rendering the payload belong to the callers on either
//! side.

use serde::Serialize;
use serde_json::Value;

use crate::error::ExtractError;
use crate::flatten::flatten_schema;
use crate::resolver::resolve_refs;
use crate::types::{TesseractMetadata, UiField};
use crate::udf::{register_udfs, FunctionDecl, UdfRegister};

/// Conventional name of the apply-endpoint input schema under
/// `components.schemas`.
pub const APPLY_INPUT_SCHEMA: &str = "Apply_InputSchema";

/// Read title, version, and description from the document root.
///
/// `info.description` is preferred; when absent, the description of the
/// apply endpoint (`paths./apply.post.description`) is used instead.
///
/// # Errors
///
/// Returns `ExtractError::MissingField` when `info.title`, `info.version`,
/// or both description sources are absent.
pub fn extract_metadata(document: &Value) -> Result<TesseractMetadata, ExtractError> {
    let title = string_at(document, "/info/title")?;
    let version = string_at(document, "/info/version")?;
    let description = document
        .pointer("/info/description")
        .and_then(Value::as_str)
        .map(str::to_string)
        .map(Ok)
        .unwrap_or_else(|| string_at(document, "/paths/~1apply/post/description"))?;

    Ok(TesseractMetadata {
        title,
        description,
        version,
    })
}

/// Parse a Tesseract OpenAPI document into metadata and a flat field list.
///
/// Resolves the apply input schema's `$ref` indirection, flattens its
/// `properties` depth-first, and derives UI addresses for every field. With
/// `pretty_headings` set, fields display declared titles and humanized
/// container headings; otherwise raw parameter names.
///
/// The document is only read; it remains valid for reuse afterwards, and a
/// failed call yields no partial output.
///
/// # Errors
///
/// Returns `ExtractError::MissingField` when the document lacks the
/// metadata landmarks or the apply input schema, and propagates resolution
/// and flattening failures.
pub fn parse_document(
    document: &Value,
    pretty_headings: bool,
) -> Result<(TesseractMetadata, Vec<UiField>), ExtractError> {
    let metadata = extract_metadata(document)?;

    let schema_pointer = format!("/components/schemas/{APPLY_INPUT_SCHEMA}");
    let input_schema =
        document
            .pointer(&schema_pointer)
            .ok_or_else(|| ExtractError::MissingField {
                pointer: schema_pointer.clone(),
            })?;

    let resolved = resolve_refs(input_schema, document)?;
    let properties = resolved
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| ExtractError::MissingField {
            pointer: format!("{schema_pointer}/properties"),
        })?;

    let fields = flatten_schema(properties, pretty_headings)?;
    let ui_fields = fields.iter().map(UiField::from_field).collect();
    Ok((metadata, ui_fields))
}

/// Everything a renderer needs: document metadata, the flattened input
/// schema, and the user-defined function registry when one was supplied.
#[derive(Debug, Clone, Serialize)]
pub struct TemplatePayload {
    pub metadata: TesseractMetadata,
    pub schema: Vec<UiField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udfs: Option<UdfRegister>,
    pub needs_pyvista: bool,
}

/// Build the complete render payload from a document and optional function
/// declarations.
///
/// # Errors
///
/// Propagates document extraction failures and function registration
/// rejections; a failed call yields no partial payload.
pub fn build_payload(
    document: &Value,
    functions: Option<&[FunctionDecl]>,
    pretty_headings: bool,
) -> Result<TemplatePayload, ExtractError> {
    let (metadata, schema) = parse_document(document, pretty_headings)?;
    let udfs = functions.map(register_udfs).transpose()?;
    let needs_pyvista = udfs.as_ref().is_some_and(UdfRegister::needs_pyvista);

    Ok(TemplatePayload {
        metadata,
        schema,
        udfs,
        needs_pyvista,
    })
}

fn string_at(document: &Value, pointer: &str) -> Result<String, ExtractError> {
    document
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ExtractError::MissingField {
            pointer: pointer.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_document() -> Value {
        json!({
            "info": {
                "title": "goodbyeworld",
                "version": "1.0.0",
                "description": "Waves goodbye."
            },
            "paths": {
                "/apply": {
                    "post": { "description": "Apply the Tesseract." }
                }
            },
            "components": {
                "schemas": {
                    "Apply_InputSchema": {
                        "type": "object",
                        "properties": {
                            "inputs": { "$ref": "#/components/schemas/InputSchema" }
                        }
                    },
                    "InputSchema": {
                        "type": "object",
                        "title": "InputSchema",
                        "properties": {
                            "name": { "type": "string", "title": "Name" }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn metadata_prefers_info_description() {
        let metadata = extract_metadata(&minimal_document()).unwrap();
        assert_eq!(metadata.title, "goodbyeworld");
        assert_eq!(metadata.version, "1.0.0");
        assert_eq!(metadata.description, "Waves goodbye.");
    }

    #[test]
    fn metadata_falls_back_to_apply_description() {
        let mut document = minimal_document();
        document["info"].as_object_mut().unwrap().remove("description");

        let metadata = extract_metadata(&document).unwrap();
        assert_eq!(metadata.description, "Apply the Tesseract.");
    }

    #[test]
    fn metadata_missing_everywhere_errors() {
        let mut document = minimal_document();
        document["info"].as_object_mut().unwrap().remove("description");
        document.as_object_mut().unwrap().remove("paths");

        let result = extract_metadata(&document);
        assert!(matches!(
            result,
            Err(ExtractError::MissingField { pointer })
                if pointer == "/paths/~1apply/post/description"
        ));
    }

    #[test]
    fn metadata_missing_title_errors() {
        let mut document = minimal_document();
        document["info"].as_object_mut().unwrap().remove("title");
        assert!(matches!(
            extract_metadata(&document),
            Err(ExtractError::MissingField { pointer }) if pointer == "/info/title"
        ));
    }

    #[test]
    fn parse_document_resolves_and_flattens() {
        let (metadata, fields) = parse_document(&minimal_document(), true).unwrap();
        assert_eq!(metadata.title, "goodbyeworld");

        let uids: Vec<&str> = fields.iter().map(|f| f.uid.as_str()).collect();
        assert_eq!(uids, ["inputs", "inputs_name"]);
        assert_eq!(fields[1].parent_container, fields[0].container);
    }

    #[test]
    fn parse_document_missing_schema_errors() {
        let mut document = minimal_document();
        document["components"]["schemas"]
            .as_object_mut()
            .unwrap()
            .remove("Apply_InputSchema");

        let result = parse_document(&document, true);
        assert!(matches!(
            result,
            Err(ExtractError::MissingField { pointer })
                if pointer == "/components/schemas/Apply_InputSchema"
        ));
    }

    #[test]
    fn parse_document_leaves_document_reusable() {
        let document = minimal_document();
        let before = document.clone();

        let first = parse_document(&document, true).unwrap();
        assert_eq!(document, before);
        let second = parse_document(&document, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn build_payload_without_functions() {
        let payload = build_payload(&minimal_document(), None, true).unwrap();
        assert!(payload.udfs.is_none());
        assert!(!payload.needs_pyvista);
        assert_eq!(payload.schema.len(), 2);
    }

    #[test]
    fn build_payload_merges_function_registry() {
        let functions = vec![FunctionDecl {
            name: "plot_volume".into(),
            params: vec!["outputs".into()],
            doc: Some("Render the output volume.".into()),
            return_type: Some("pyvista.Plotter".into()),
        }];

        let payload = build_payload(&minimal_document(), Some(&functions), true).unwrap();
        let udfs = payload.udfs.unwrap();
        assert_eq!(udfs.outputs.len(), 1);
        assert!(payload.needs_pyvista);
    }

    #[test]
    fn build_payload_rejects_bad_functions_outright() {
        let functions = vec![FunctionDecl {
            name: "plot_mesh".into(),
            params: vec!["mesh".into()],
            doc: None,
            return_type: None,
        }];

        let result = build_payload(&minimal_document(), Some(&functions), true);
        assert!(matches!(result, Err(ExtractError::Udf(_))));
    }
}
