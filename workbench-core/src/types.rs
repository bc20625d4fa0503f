//! Domain types for workbench templates and rendering.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Template and output paths are *relative* — resolving them against a
//! destination directory is the filesystem writer's job, not ours.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a template in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateName(pub String);

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed name for a substitution variable (`ProjectName`, `Owner`, …).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariableName(pub String);

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for VariableName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VariableName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// One file entry inside a template: relative path plus raw text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Path relative to the template root. May itself contain tokens.
    pub path: PathBuf,
    /// Raw text, possibly containing `{{.Name}}` tokens.
    pub content: String,
}

impl TemplateFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }
}

/// A named, ordered bundle of file entries. Immutable once constructed;
/// the catalog collaborator builds these, the renderer only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: TemplateName,
    files: Vec<TemplateFile>,
}

impl Template {
    pub fn new(name: impl Into<TemplateName>, files: Vec<TemplateFile>) -> Self {
        Self { name: name.into(), files }
    }

    /// File entries in template order.
    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

// ---------------------------------------------------------------------------
// Values and variable sets
// ---------------------------------------------------------------------------

/// A collected parameter value.
///
/// Lists come from multiselect parameters and format as comma-joined
/// strings both in substitution and in condition comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Bool(bool),
    List(Vec<String>),
}

impl Value {
    /// The string this value substitutes as.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::List(items) => items.join(","),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// The resolved name → value mapping supplied at render time.
///
/// Backed by a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSet(BTreeMap<VariableName, String>);

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<VariableName>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&VariableName::from(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&VariableName::from(name))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&VariableName, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl<N: Into<VariableName>, V: Into<String>> FromIterator<(N, V)> for VariableSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect())
    }
}

// ---------------------------------------------------------------------------
// Rendered output
// ---------------------------------------------------------------------------

/// One substituted file, ready for the filesystem writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Ordered rendered files, isomorphic in shape to the source [`Template`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedOutput {
    files: Vec<RenderedFile>,
}

impl RenderedOutput {
    pub fn new(files: Vec<RenderedFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[RenderedFile] {
        &self.files
    }

    /// Relative paths in output order.
    pub fn paths(&self) -> Vec<&PathBuf> {
        self.files.iter().map(|f| &f.path).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

impl IntoIterator for RenderedOutput {
    type Item = RenderedFile;
    type IntoIter = std::vec::IntoIter<RenderedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(TemplateName::from("fastapi-basic").to_string(), "fastapi-basic");
        assert_eq!(VariableName::from("ProjectName").to_string(), "ProjectName");
    }

    #[test]
    fn newtype_equality() {
        let a = VariableName::from("x");
        let b = VariableName::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn value_render_forms() {
        assert_eq!(Value::from("atlas").render(), "atlas");
        assert_eq!(Value::from(true).render(), "true");
        assert_eq!(Value::from(false).render(), "false");
        assert_eq!(
            Value::List(vec!["Jest".into(), "Playwright".into()]).render(),
            "Jest,Playwright"
        );
    }

    #[test]
    fn variable_set_lookup() {
        let mut vars = VariableSet::new();
        vars.insert("ProjectName", "Atlas");
        assert_eq!(vars.get("ProjectName"), Some("Atlas"));
        assert!(vars.contains("ProjectName"));
        assert!(!vars.contains("Owner"));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn variable_set_iterates_in_name_order() {
        let vars: VariableSet =
            [("Owner", "Jane"), ("ProjectName", "Atlas"), ("License", "MIT")]
                .into_iter()
                .collect();
        let names: Vec<String> = vars.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["License", "Owner", "ProjectName"]);
    }

    #[test]
    fn template_serde_roundtrip() {
        let tpl = Template::new(
            "demo",
            vec![TemplateFile::new("src/main.py", "hi {{.ProjectName}}")],
        );
        let json = serde_json::to_string(&tpl).expect("serialize");
        let back: Template = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(tpl, back);
    }
}
