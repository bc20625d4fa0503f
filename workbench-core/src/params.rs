//! Parameter resolution against a [`TemplateManifest`].
//!
//! The CLI collaborator collects raw values; [`ParameterResolver`] owns the
//! logic around them: which parameters are visible given what has been
//! collected so far, whether a value is acceptable, and how the collected
//! values plus manifest defaults fold into the final [`VariableSet`] handed
//! to the renderer.

use std::collections::BTreeMap;

use regex::Regex;

use crate::condition::Condition;
use crate::error::ParameterError;
use crate::manifest::{Parameter, ParameterKind, TemplateManifest};
use crate::types::{Value, VariableName, VariableSet};

/// Tracks collected values for one manifest and resolves them to a
/// [`VariableSet`].
#[derive(Debug)]
pub struct ParameterResolver<'m> {
    manifest: &'m TemplateManifest,
    values: BTreeMap<VariableName, Value>,
}

impl<'m> ParameterResolver<'m> {
    pub fn new(manifest: &'m TemplateManifest) -> Self {
        Self { manifest, values: BTreeMap::new() }
    }

    /// Construct with a batch of already-collected values, validating each.
    pub fn with_values<I, N>(manifest: &'m TemplateManifest, values: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = (N, Value)>,
        N: Into<VariableName>,
    {
        let mut resolver = Self::new(manifest);
        for (name, value) in values {
            resolver.set(name, value)?;
        }
        Ok(resolver)
    }

    /// Validate and store one collected value.
    pub fn set(
        &mut self,
        name: impl Into<VariableName>,
        value: Value,
    ) -> Result<(), ParameterError> {
        let name = name.into();
        let param = self
            .manifest
            .parameter(&name.0)
            .ok_or_else(|| ParameterError::Unknown { name: name.0.clone() })?;
        validate_value(param, &value)?;
        self.values.insert(name, value);
        Ok(())
    }

    /// The collected value for `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(&VariableName::from(name))
    }

    /// All collected values, keyed by name.
    pub fn values(&self) -> &BTreeMap<VariableName, Value> {
        &self.values
    }

    /// Parameters whose visibility condition holds against the collected
    /// values. A parameter with no condition is always visible; one whose
    /// condition does not parse is shown rather than silently hidden.
    pub fn visible_parameters(&self) -> Vec<&'m Parameter> {
        self.manifest
            .parameters
            .iter()
            .filter(|param| self.is_visible(param))
            .collect()
    }

    fn is_visible(&self, param: &Parameter) -> bool {
        match &param.condition {
            None => true,
            Some(raw) => match Condition::parse(raw) {
                Ok(cond) => cond.evaluate(&self.values),
                Err(_) => true,
            },
        }
    }

    /// Visible parameters organised by group heading, group names sorted.
    /// Ungrouped parameters fall under "General".
    pub fn parameter_groups(&self) -> BTreeMap<String, Vec<&'m Parameter>> {
        let mut groups: BTreeMap<String, Vec<&'m Parameter>> = BTreeMap::new();
        for param in self.visible_parameters() {
            let group = param.group.clone().unwrap_or_else(|| "General".to_owned());
            groups.entry(group).or_default().push(param);
        }
        groups
    }

    /// Visible parameters marked required.
    pub fn required_parameters(&self) -> Vec<&'m Parameter> {
        self.visible_parameters()
            .into_iter()
            .filter(|p| p.required)
            .collect()
    }

    /// Names of visible required parameters with neither a collected value
    /// nor a manifest default.
    pub fn missing_required(&self) -> Vec<&'m str> {
        self.required_parameters()
            .into_iter()
            .filter(|p| self.value(&p.name).is_none() && p.default.is_none())
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Collected-or-default values for every visible parameter, as [`Value`]s.
    /// This is what condition evaluation sees downstream.
    pub fn effective_values(&self) -> BTreeMap<VariableName, Value> {
        let mut out = BTreeMap::new();
        for param in self.visible_parameters() {
            if let Some(v) = self.value(&param.name).or(param.default.as_ref()) {
                out.insert(VariableName::from(param.name.as_str()), v.clone());
            }
        }
        out
    }

    /// Fold collected values and manifest defaults into the final
    /// [`VariableSet`]. Collected values win over defaults; hidden
    /// parameters contribute nothing. Fails on the first visible required
    /// parameter left without a value.
    pub fn resolve(&self) -> Result<VariableSet, ParameterError> {
        let mut vars = VariableSet::new();
        for param in self.visible_parameters() {
            let value = self.value(&param.name).or(param.default.as_ref());
            match value {
                Some(v) => vars.insert(param.name.as_str(), v.render()),
                None if param.required => {
                    return Err(ParameterError::MissingRequired { name: param.name.clone() });
                }
                None => {}
            }
        }
        Ok(vars)
    }
}

/// Validate a value against a parameter's kind and validation rules.
pub fn validate_value(param: &Parameter, value: &Value) -> Result<(), ParameterError> {
    match (param.kind, value) {
        (ParameterKind::String, Value::Str(s)) => validate_string(param, s),
        (ParameterKind::Boolean, Value::Bool(_)) => Ok(()),
        (ParameterKind::Select, Value::Str(s)) => {
            if param.options.contains(s) {
                Ok(())
            } else {
                Err(ParameterError::NotAnOption {
                    name: param.name.clone(),
                    value: s.clone(),
                })
            }
        }
        (ParameterKind::Multiselect, Value::List(items)) => {
            match items.iter().find(|i| !param.options.contains(i)) {
                None => Ok(()),
                Some(bad) => Err(ParameterError::NotAnOption {
                    name: param.name.clone(),
                    value: bad.clone(),
                }),
            }
        }
        (kind, _) => Err(ParameterError::TypeMismatch {
            name: param.name.clone(),
            expected: expected_for(kind),
        }),
    }
}

fn expected_for(kind: ParameterKind) -> &'static str {
    match kind {
        ParameterKind::String | ParameterKind::Select => "string",
        ParameterKind::Boolean => "boolean",
        ParameterKind::Multiselect => "list of strings",
    }
}

fn validate_string(param: &Parameter, value: &str) -> Result<(), ParameterError> {
    let Some(validation) = &param.validation else {
        return Ok(());
    };
    let regex = Regex::new(&validation.regex).map_err(|source| ParameterError::BadRegex {
        name: param.name.clone(),
        source,
    })?;
    if regex.is_match(value) {
        return Ok(());
    }
    let message = validation
        .error_message
        .clone()
        .unwrap_or_else(|| "value does not match required pattern".to_owned());
    Err(ParameterError::ValidationFailed { name: param.name.clone(), message })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
