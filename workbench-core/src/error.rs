//! Error types for workbench-core.

use thiserror::Error;

/// All errors that can arise from loading or validating a `template.json`.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// JSON parse error — includes line/column context from serde_json.
    #[error("failed to parse template manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest `name` field is empty.
    #[error("template manifest has an empty name")]
    EmptyName,

    /// Two parameters share the same name.
    #[error("duplicate parameter '{name}' in template manifest")]
    DuplicateParameter { name: String },

    /// A select/multiselect parameter declares no options.
    #[error("parameter '{name}' is a {kind} but declares no options")]
    MissingOptions { name: String, kind: String },

    /// A parameter default is not one of its declared options.
    #[error("parameter '{name}' default '{default}' is not a declared option")]
    DefaultNotAnOption { name: String, default: String },

    /// A condition string failed to parse.
    #[error("invalid condition on '{owner}': {source}")]
    BadCondition {
        owner: String,
        #[source]
        source: ConditionError,
    },

    /// A validation regex failed to compile.
    #[error("parameter '{name}' has an invalid validation regex: {source}")]
    BadRegex {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors from parsing or evaluating a condition string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConditionError {
    /// The condition is not of the form `Name == literal` or `Name != literal`.
    #[error("unsupported condition format: {condition}")]
    Unsupported { condition: String },

    /// An operand side of the comparison is empty.
    #[error("condition has an empty operand: {condition}")]
    EmptyOperand { condition: String },
}

/// Errors from validating or resolving parameter values.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// The supplied value's type does not match the parameter's kind.
    #[error("parameter '{name}' expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    /// A select/multiselect value is not one of the declared options.
    #[error("parameter '{name}': '{value}' is not a valid option")]
    NotAnOption { name: String, value: String },

    /// A string value failed its regex validation.
    #[error("parameter '{name}': {message}")]
    ValidationFailed { name: String, message: String },

    /// The validation regex failed to compile.
    #[error("parameter '{name}' has an invalid validation regex: {source}")]
    BadRegex {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A required, visible parameter has no collected value and no default.
    #[error("required parameter '{name}' was not provided")]
    MissingRequired { name: String },

    /// A value was supplied for a parameter the manifest does not declare.
    #[error("unknown parameter '{name}'")]
    Unknown { name: String },
}
