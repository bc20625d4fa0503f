//! Workbench core library — domain types, template manifests, parameters.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs ([`Template`], [`VariableSet`], …)
//! - [`manifest`] — `template.json` model and parsing
//! - [`condition`] — the `Name == literal` / `Name != literal` condition language
//! - [`params`] — [`ParameterResolver`]: validation, visibility, defaults
//! - [`error`] — [`ManifestError`], [`ConditionError`], [`ParameterError`]

pub mod condition;
pub mod error;
pub mod manifest;
pub mod params;
pub mod types;

pub use condition::Condition;
pub use error::{ConditionError, ManifestError, ParameterError};
pub use manifest::{
    CommandRule, FileRule, Parameter, ParameterKind, PostScaffold, TemplateManifest, Validation,
};
pub use params::ParameterResolver;
pub use types::{
    RenderedFile, RenderedOutput, Template, TemplateFile, TemplateName, Value, VariableName,
    VariableSet,
};
