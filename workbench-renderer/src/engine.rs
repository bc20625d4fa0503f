//! The rendering engine — [`Renderer`].
//!
//! Rendering is a pure in-memory transformation: given a [`Template`] and a
//! [`VariableSet`], produce a [`RenderedOutput`] with identical file count,
//! paths, and order, where only token spans differ from the input. The
//! engine performs no I/O and keeps no mutable state, so one instance can
//! serve any number of independent renders.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use workbench_core::types::{RenderedFile, RenderedOutput, Template, VariableSet};

use crate::error::RenderError;
use crate::scanner;

/// Token-substitution renderer over whole templates.
///
/// Create once with [`Renderer::new`] and reuse.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    /// Render every file of `template` against `variables`.
    ///
    /// Output shape is isomorphic to the input: same count, same relative
    /// paths, same order. The first error — files in template order, bytes
    /// left to right within a file — aborts the whole render; no partial
    /// output is returned. An empty template renders to an empty output.
    pub fn render(
        &self,
        template: &Template,
        variables: &VariableSet,
    ) -> Result<RenderedOutput, RenderError> {
        let mut files = Vec::with_capacity(template.len());
        for entry in template.files() {
            let content = scanner::substitute(&entry.path, &entry.content, variables)?;
            files.push(RenderedFile { path: entry.path.clone(), content });
        }
        Ok(RenderedOutput::new(files))
    }

    /// Render a single relative path, substituting tokens in its text form.
    ///
    /// Used by the scaffold planner for templated file names.
    pub fn render_path(
        &self,
        path: &Path,
        variables: &VariableSet,
    ) -> Result<PathBuf, RenderError> {
        let text = path.to_string_lossy();
        let rendered = scanner::substitute(path, &text, variables)?;
        Ok(PathBuf::from(rendered))
    }

    /// The distinct variable names referenced anywhere in `template` —
    /// file contents and file paths alike. Lets a caller check VariableSet
    /// coverage before committing to a render.
    pub fn referenced_variables(
        &self,
        template: &Template,
    ) -> Result<BTreeSet<String>, RenderError> {
        let mut names = BTreeSet::new();
        for entry in template.files() {
            let path_text = entry.path.to_string_lossy();
            for token in scanner::scan(&entry.path, &path_text)? {
                names.insert(token.name.to_owned());
            }
            for token in scanner::scan(&entry.path, &entry.content)? {
                names.insert(token.name.to_owned());
            }
        }
        Ok(names)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
