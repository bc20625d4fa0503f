//! Error types for workbench-renderer.

use std::path::PathBuf;

use thiserror::Error;

use workbench_core::error::{ConditionError, ManifestError, ParameterError};

/// All errors that can arise from rendering a template.
///
/// Both variants are caller-input errors, not system faults: they are
/// deterministic, so the renderer never logs or retries. The first error
/// encountered (file order, then byte order within the file) aborts the
/// whole render; no partial output is ever returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A token references a name absent from the variable set.
    #[error("unresolved variable '{name}' in {path}")]
    UnresolvedVariable { name: String, path: PathBuf },

    /// A `{{.` opener is not completed by an identifier and `}}`.
    /// `offset` is the byte offset of the opener within the file.
    #[error("malformed token in {path} at byte {offset}")]
    MalformedToken { path: PathBuf, offset: usize },
}

/// Errors from building a scaffold plan on top of a manifest.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Rendering a file path or file content failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Collected values did not satisfy the manifest.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// A post-scaffold deletion rule carries an unparseable condition.
    #[error(transparent)]
    Condition(#[from] ConditionError),

    /// The embedded built-in manifest failed to parse.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
