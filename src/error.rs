//! Error types for schema resolution, flattening, and function registration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during document loading and `$ref` resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot resolve \"{pointer}\": no segment \"{segment}\" in document")]
    UnresolvedRef { pointer: String, segment: String },
}

/// Errors while flattening a resolved schema into field descriptors.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("union at {path} has no members besides null")]
    NullOnlyUnion { path: String },

    #[error("unsupported type \"{type_tag}\" at {path}")]
    UnknownType { path: String, type_tag: String },

    #[error("field at {path} declares no type, union, or properties")]
    MissingType { path: String },
}

/// Errors registering user-supplied visualization functions.
#[derive(Debug, Error)]
pub enum UdfError {
    #[error(
        "function parameters must be 'inputs' and / or 'outputs'; \"{}\" has parameters [{}]",
        name,
        params.join(", ")
    )]
    InvalidParameters { name: String, params: Vec<String> },
}

/// Top-level error for full-document extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error(transparent)]
    Udf(#[from] UdfError),

    #[error("document missing required field at {pointer}")]
    MissingField { pointer: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_ref_display() {
        let err = ResolveError::UnresolvedRef {
            pointer: "#/components/schemas/Missing".into(),
            segment: "Missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve \"#/components/schemas/Missing\": no segment \"Missing\" in document"
        );
    }

    #[test]
    fn null_only_union_names_the_node() {
        let err = FlattenError::NullOnlyUnion {
            path: "/person/age".into(),
        };
        assert_eq!(
            err.to_string(),
            "union at /person/age has no members besides null"
        );
    }

    #[test]
    fn invalid_parameters_lists_actual_params() {
        let err = UdfError::InvalidParameters {
            name: "plot_mesh".into(),
            params: vec!["data".into(), "axis".into()],
        };
        let message = err.to_string();
        assert!(message.contains("plot_mesh"));
        assert!(message.contains("[data, axis]"));
    }

    #[test]
    fn extract_error_wraps_stage_errors() {
        let err: ExtractError = FlattenError::NullOnlyUnion {
            path: "/person".into(),
        }
        .into();
        assert!(matches!(err, ExtractError::Flatten(_)));

        let err: ExtractError = ResolveError::UnresolvedRef {
            pointer: "#/a/b".into(),
            segment: "b".into(),
        }
        .into();
        assert!(matches!(err, ExtractError::Resolve(_)));
    }
}
