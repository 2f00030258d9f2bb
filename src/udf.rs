//! Registry of user-supplied visualization functions.
//!
//! Users may hand the generator a module of plotting functions to run
//! against Tesseract inputs and outputs. The engine never executes that
//! code; it works from declarative [`FunctionDecl`] records (name,
//! parameter list, docstring, return type) produced by whatever inspects
//! the module. Registration sorts each function by the parameters it
//! declares, so the generated app can call it with the right arguments.

use serde::{Deserialize, Serialize};

use crate::error::UdfError;

/// Return type annotations that mark a function as producing a PyVista
/// plotter, the supported 3D visualization object.
pub const PLOTTER_RETURN_TYPES: &[&str] = &["Plotter", "pv.Plotter", "pyvista.Plotter"];

/// Plotting backend a function's output renders with.
///
/// `Builtin` output is supported natively by the generated app; `Pyvista`
/// marks functions returning a 3D plotter that needs dedicated support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Builtin,
    Pyvista,
}

/// Declarative description of one user-supplied function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    /// Declared parameter names, in signature order.
    pub params: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Declared return type annotation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// Brief summary of an accepted function: its name, the first docstring
/// line as a title, the remainder as documentation, and the backend its
/// output renders with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDescription {
    pub name: String,
    pub title: String,
    pub docs: String,
    pub backend: Backend,
}

/// Accepted functions sorted by the parameters they take.
///
/// Functions taking Tesseract inputs land in `inputs`, likewise for
/// `outputs`; functions taking both land in `both`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdfRegister {
    pub inputs: Vec<FuncDescription>,
    pub outputs: Vec<FuncDescription>,
    pub both: Vec<FuncDescription>,
}

impl UdfRegister {
    /// Whether any registered function renders through the PyVista backend.
    pub fn needs_pyvista(&self) -> bool {
        [&self.inputs, &self.outputs, &self.both]
            .into_iter()
            .flatten()
            .any(|func| func.backend == Backend::Pyvista)
    }
}

/// Sort function declarations into a register by their parameter lists.
///
/// Each function must declare exactly the parameter `inputs`, exactly
/// `outputs`, or both together; anything else is rejected eagerly. A
/// function without a docstring is tolerated: a warning is logged and its
/// title and docs are left empty.
///
/// # Errors
///
/// Returns `UdfError::InvalidParameters` naming the first offending
/// function and its actual parameter list.
pub fn register_udfs(decls: &[FunctionDecl]) -> Result<UdfRegister, UdfError> {
    let mut register = UdfRegister::default();
    for decl in decls {
        let params: Vec<&str> = decl.params.iter().map(String::as_str).collect();
        let bucket = match params.as_slice() {
            ["inputs"] => &mut register.inputs,
            ["outputs"] => &mut register.outputs,
            _ if takes_both(&params) => &mut register.both,
            _ => {
                return Err(UdfError::InvalidParameters {
                    name: decl.name.clone(),
                    params: decl.params.clone(),
                })
            }
        };
        bucket.push(describe(decl));
    }
    Ok(register)
}

/// Whether a parameter list is some arrangement of `inputs` and `outputs`
/// with both present.
fn takes_both(params: &[&str]) -> bool {
    !params.is_empty()
        && params.iter().all(|p| matches!(*p, "inputs" | "outputs"))
        && params.contains(&"inputs")
        && params.contains(&"outputs")
}

fn describe(decl: &FunctionDecl) -> FuncDescription {
    let backend = match decl.return_type.as_deref() {
        Some(annotation) if PLOTTER_RETURN_TYPES.contains(&annotation) => Backend::Pyvista,
        _ => Backend::Builtin,
    };

    let docstring = match decl.doc.as_deref() {
        Some(doc) => doc,
        None => {
            log::warn!(
                "function '{}' does not have a docstring; plot title and \
                 description will be populated with empty strings",
                decl.name
            );
            ""
        }
    };
    let (title, docs) = match docstring.split_once('\n') {
        Some((first_line, rest)) => (first_line.to_string(), rest.trim().to_string()),
        None => (docstring.to_string(), String::new()),
    };

    FuncDescription {
        name: decl.name.clone(),
        title,
        docs,
        backend,
    }
}
