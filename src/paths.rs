//! UI addressing - derives container identifiers from ancestor paths.
//!
//! Every field's addresses are pure functions of its own ancestor chain:
//! `uid` joins the chain with underscores, `key` with dots, `stem` is the
//! final link, and the container identifiers prefix `uid` (or the parent's
//! `uid`) with `container_`. Property keys come from identifier-restricted
//! schema fields, so distinct chains never collide after joining.

use crate::types::{FieldDescriptor, UiField};

/// Parent container of every root-level field.
pub const ROOT_CONTAINER: &str = "root";

impl UiField {
    /// Derive the UI addressing view of a field descriptor.
    ///
    /// The resulting `parent_container` equals the `container` computed for
    /// the descriptor one level shallower along the same ancestor path;
    /// root-level fields (a single ancestor) get [`ROOT_CONTAINER`].
    pub fn from_field(field: &FieldDescriptor) -> UiField {
        let ancestors = &field.ancestors;
        let uid = ancestors.join("_");
        let parent_container = if ancestors.len() > 1 {
            format!("container_{}", ancestors[..ancestors.len() - 1].join("_"))
        } else {
            ROOT_CONTAINER.to_string()
        };

        UiField {
            parent_container,
            container: format!("container_{uid}"),
            stem: ancestors.last().cloned().unwrap_or_default(),
            key: ancestors.join("."),
            uid,
            field_type: field.field_type,
            title: field.title.clone(),
            description: field.description.clone(),
            optional: field.optional,
            default: field.default.clone(),
            number_constraints: field.number_constraints,
            could_be_number: field.could_be_number,
        }
    }
}

impl From<&FieldDescriptor> for UiField {
    fn from(field: &FieldDescriptor) -> Self {
        UiField::from_field(field)
    }
}
