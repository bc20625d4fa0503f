//! `template.json` manifest model.
//!
//! Every template in the catalog carries a manifest describing its display
//! metadata, the parameters to collect before rendering, and the
//! post-scaffold rules (conditional deletions and commands) that external
//! collaborators execute after the files are written.
//!
//! # Example
//!
//! ```json
//! {
//!   "name": "FastAPI Basic",
//!   "description": "A minimal FastAPI service.",
//!   "parameters": [
//!     {
//!       "name": "ProjectName",
//!       "prompt": "What is your project name?",
//!       "type": "string",
//!       "required": true,
//!       "validation": { "regex": "^[a-zA-Z0-9_-]+$" }
//!     }
//!   ]
//! }
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::ManifestError;
use crate::types::Value;

/// The kind of value a parameter collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Boolean,
    Select,
    Multiselect,
}

impl ParameterKind {
    /// Human-readable kind name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::String => "string",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Select => "select",
            ParameterKind::Multiselect => "multiselect",
        }
    }
}

/// Regex validation rules for string parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub regex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// A single parameter the caller must collect before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Group heading for UI organisation; ungrouped parameters fall under
    /// "General".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Visibility condition; an unparseable condition shows the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// A file or directory to delete when its condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRule {
    pub path: String,
    pub condition: String,
}

/// A command to run after scaffolding, optionally condition-gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRule {
    pub command: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Post-scaffold rules. Planned, never executed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostScaffold {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_to_delete: Vec<FileRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandRule>,
}

/// The parsed `template.json` for one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_scaffold: Option<PostScaffold>,
}

impl TemplateManifest {
    /// Parse and structurally validate a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: TemplateManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Structural validation beyond what serde enforces:
    /// non-empty name, unique parameter names, options present on
    /// select/multiselect, defaults drawn from options, parseable
    /// post-scaffold conditions, compilable validation regexes.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::EmptyName);
        }

        let mut seen = std::collections::BTreeSet::new();
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(ManifestError::DuplicateParameter { name: param.name.clone() });
            }
            param.validate()?;
        }

        if let Some(post) = &self.post_scaffold {
            for rule in &post.files_to_delete {
                Condition::parse(&rule.condition).map_err(|source| {
                    ManifestError::BadCondition { owner: rule.path.clone(), source }
                })?;
            }
            for rule in &post.commands {
                if let Some(condition) = &rule.condition {
                    Condition::parse(condition).map_err(|source| {
                        ManifestError::BadCondition { owner: rule.command.clone(), source }
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl Parameter {
    fn validate(&self) -> Result<(), ManifestError> {
        match self.kind {
            ParameterKind::Select | ParameterKind::Multiselect if self.options.is_empty() => {
                return Err(ManifestError::MissingOptions {
                    name: self.name.clone(),
                    kind: self.kind.as_str().to_owned(),
                });
            }
            _ => {}
        }

        if let Some(default) = &self.default {
            match (self.kind, default) {
                (ParameterKind::Select, Value::Str(s)) if !self.options.contains(s) => {
                    return Err(ManifestError::DefaultNotAnOption {
                        name: self.name.clone(),
                        default: s.clone(),
                    });
                }
                (ParameterKind::Multiselect, Value::List(items)) => {
                    if let Some(bad) = items.iter().find(|i| !self.options.contains(i)) {
                        return Err(ManifestError::DefaultNotAnOption {
                            name: self.name.clone(),
                            default: bad.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        if let Some(validation) = &self.validation {
            Regex::new(&validation.regex).map_err(|source| ManifestError::BadRegex {
                name: self.name.clone(),
                source,
            })?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "name": "FastAPI Basic",
        "description": "A minimal FastAPI service.",
        "parameters": [
            {
                "name": "ProjectName",
                "prompt": "What is your project name?",
                "type": "string",
                "required": true,
                "validation": {
                    "regex": "^[a-zA-Z0-9_-]+$",
                    "errorMessage": "Use letters, digits, hyphens, underscores."
                }
            },
            {
                "name": "Owner",
                "prompt": "Who owns this project?",
                "type": "string",
                "required": true
            }
        ]
    }"#;

    #[test]
    fn parses_minimal_manifest() {
        let manifest = TemplateManifest::from_json(MINIMAL).expect("parse");
        assert_eq!(manifest.name, "FastAPI Basic");
        assert_eq!(manifest.parameters.len(), 2);
        let project = manifest.parameter("ProjectName").expect("ProjectName present");
        assert_eq!(project.kind, ParameterKind::String);
        assert!(project.required);
        assert_eq!(
            project.validation.as_ref().map(|v| v.regex.as_str()),
            Some("^[a-zA-Z0-9_-]+$")
        );
    }

    #[test]
    fn parses_post_scaffold_rules() {
        let json = r#"{
            "name": "demo",
            "parameters": [],
            "postScaffold": {
                "filesToDelete": [
                    { "path": "tests/", "condition": "IncludeTesting == false" }
                ],
                "commands": [
                    { "command": "git init", "description": "Initialise git" },
                    {
                        "command": "npm install",
                        "description": "Install deps",
                        "condition": "InstallDeps == true"
                    }
                ]
            }
        }"#;
        let manifest = TemplateManifest::from_json(json).expect("parse");
        let post = manifest.post_scaffold.expect("postScaffold present");
        assert_eq!(post.files_to_delete.len(), 1);
        assert_eq!(post.commands.len(), 2);
        assert!(post.commands[0].condition.is_none());
    }

    #[test]
    fn rejects_empty_name() {
        let err = TemplateManifest::from_json(r#"{"name": "  ", "parameters": []}"#)
            .expect_err("empty name must fail");
        assert!(matches!(err, ManifestError::EmptyName));
    }

    #[test]
    fn rejects_duplicate_parameter_names() {
        let json = r#"{
            "name": "demo",
            "parameters": [
                { "name": "X", "prompt": "x?", "type": "string" },
                { "name": "X", "prompt": "x again?", "type": "boolean" }
            ]
        }"#;
        let err = TemplateManifest::from_json(json).expect_err("dup must fail");
        assert!(matches!(err, ManifestError::DuplicateParameter { name } if name == "X"));
    }

    #[test]
    fn rejects_select_without_options() {
        let json = r#"{
            "name": "demo",
            "parameters": [
                { "name": "Framework", "prompt": "pick", "type": "select" }
            ]
        }"#;
        let err = TemplateManifest::from_json(json).expect_err("must fail");
        assert!(matches!(err, ManifestError::MissingOptions { .. }));
    }

    #[test]
    fn rejects_default_outside_options() {
        let json = r#"{
            "name": "demo",
            "parameters": [
                {
                    "name": "Framework",
                    "prompt": "pick",
                    "type": "select",
                    "options": ["FastAPI", "Flask"],
                    "default": "Django"
                }
            ]
        }"#;
        let err = TemplateManifest::from_json(json).expect_err("must fail");
        assert!(matches!(err, ManifestError::DefaultNotAnOption { default, .. } if default == "Django"));
    }

    #[test]
    fn rejects_bad_post_scaffold_condition() {
        let json = r#"{
            "name": "demo",
            "parameters": [],
            "postScaffold": {
                "filesToDelete": [
                    { "path": "tests/", "condition": "IncludeTesting" }
                ]
            }
        }"#;
        let err = TemplateManifest::from_json(json).expect_err("must fail");
        assert!(matches!(err, ManifestError::BadCondition { .. }));
    }

    #[test]
    fn rejects_bad_validation_regex() {
        let json = r#"{
            "name": "demo",
            "parameters": [
                {
                    "name": "X",
                    "prompt": "x?",
                    "type": "string",
                    "validation": { "regex": "([unclosed" }
                }
            ]
        }"#;
        let err = TemplateManifest::from_json(json).expect_err("must fail");
        assert!(matches!(err, ManifestError::BadRegex { .. }));
    }

    #[test]
    fn manifest_serde_roundtrip() {
        let manifest = TemplateManifest::from_json(MINIMAL).unwrap();
        let json = serde_json::to_string(&manifest).expect("serialize");
        let back: TemplateManifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(manifest, back);
    }
}
