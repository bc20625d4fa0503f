//! The manifest condition language.
//!
//! Conditions gate parameter visibility, post-scaffold deletions, and
//! post-scaffold commands. The language is deliberately tiny — two forms:
//!
//! ```text
//! Name == literal      e.g.  IncludeTesting == true
//! Name != literal      e.g.  TestingFramework != 'Jest'
//! ```
//!
//! Literals are `true`/`false` (booleans) or strings, optionally wrapped in
//! single or double quotes. Conditions are parsed once into a typed
//! [`Condition`] rather than re-split on every evaluation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConditionError;
use crate::types::{Value, VariableName};

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Ne,
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Bool(bool),
    Str(String),
}

/// A parsed condition: `<name> <op> <operand>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: VariableName,
    pub op: Comparison,
    pub operand: Operand,
}

impl Condition {
    /// Parse a condition string.
    ///
    /// Returns `ConditionError::Unsupported` when neither `==` nor `!=` is
    /// present, and `ConditionError::EmptyOperand` when either side of the
    /// operator is blank.
    pub fn parse(condition: &str) -> Result<Self, ConditionError> {
        let condition = condition.trim();
        let (op, raw_op) = if condition.contains("==") {
            (Comparison::Eq, "==")
        } else if condition.contains("!=") {
            (Comparison::Ne, "!=")
        } else {
            return Err(ConditionError::Unsupported { condition: condition.to_owned() });
        };

        let Some((lhs, rhs)) = condition.split_once(raw_op) else {
            return Err(ConditionError::Unsupported { condition: condition.to_owned() });
        };
        let name = lhs.trim();
        let literal = rhs.trim();
        if name.is_empty() || literal.is_empty() {
            return Err(ConditionError::EmptyOperand { condition: condition.to_owned() });
        }

        let operand = match literal {
            "true" => Operand::Bool(true),
            "false" => Operand::Bool(false),
            other => Operand::Str(strip_quotes(other).to_owned()),
        };

        Ok(Condition { name: VariableName::from(name), op, operand })
    }

    /// Evaluate against collected parameter values.
    ///
    /// An absent name makes `==` false and `!=` true. Non-boolean operands
    /// compare against the value's substitution form (see [`Value::render`]).
    pub fn evaluate(&self, values: &BTreeMap<VariableName, Value>) -> bool {
        let matched = match values.get(&self.name) {
            None => false,
            Some(actual) => match (&self.operand, actual) {
                (Operand::Bool(expected), Value::Bool(b)) => b == expected,
                (Operand::Bool(expected), other) => other.render() == expected.to_string(),
                (Operand::Str(expected), other) => &other.render() == expected,
            },
        };
        match self.op {
            Comparison::Eq => matched,
            Comparison::Ne => !matched,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
        };
        match &self.operand {
            Operand::Bool(b) => write!(f, "{} {} {}", self.name, op, b),
            Operand::Str(s) => write!(f, "{} {} '{}'", self.name, op, s),
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
