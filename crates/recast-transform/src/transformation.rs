//! The contract every transformation implements.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::fs::{FileSystem, FsChange};
use crate::log::Log;
use crate::selection::Selection;
use crate::text::EditSet;

/// Maturity level advertised by a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quality {
    /// Experimental; expect rough edges.
    InTesting,
    /// Feature complete but still being hardened.
    InDevelopment,
    /// Ready for general use.
    Production,
}

impl Quality {
    /// Every quality level, least mature first.
    pub const ALL: [Self; 3] = [Self::InTesting, Self::InDevelopment, Self::Production];

    /// Parses the wire spelling (`in_testing`, `in_development`,
    /// `production`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|quality| quality.as_str() == value)
    }

    /// Wire spelling of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InTesting => "in_testing",
            Self::InDevelopment => "in_development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value of a transformation parameter.
///
/// The variant doubles as the parameter's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Free-form text.
    Text(String),
    /// A yes/no choice.
    Bool(bool),
    /// An integer.
    Int(i64),
}

impl ParamValue {
    /// Name of the parameter type as reported to clients.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
        }
    }
}

/// A value the client should prompt for before running a transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    label: String,
    prompt: String,
    default: ParamValue,
}

impl Parameter {
    /// Creates a parameter description.
    #[must_use]
    pub fn new(label: impl Into<String>, prompt: impl Into<String>, default: ParamValue) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
            default,
        }
    }

    /// Short label shown next to the input field.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Longer explanation of what to enter.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Default value, which also fixes the parameter type.
    #[must_use]
    pub const fn default_value(&self) -> &ParamValue {
        &self.default
    }
}

/// Static description of a transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    name: String,
    quality: Quality,
    params: Vec<Parameter>,
}

impl Description {
    /// Creates a description with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, quality: Quality) -> Self {
        Self {
            name: name.into(),
            quality,
            params: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maturity level.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Parameters in prompting order.
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

/// Everything a transformation receives for one run.
#[derive(Clone)]
pub struct TransformationConfig {
    /// File system the transformation reads through.
    pub file_system: Arc<dyn FileSystem>,
    /// Files the transformation may consider beyond the selection, when
    /// restricted.
    pub scope: Option<Vec<PathBuf>>,
    /// The client's text selection.
    pub selection: Selection,
    /// Positional arguments, as supplied by the client.
    pub args: Vec<serde_json::Value>,
}

impl fmt::Debug for TransformationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationConfig")
            .field("scope", &self.scope)
            .field("selection", &self.selection)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Outcome of a transformation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationResult {
    /// Messages produced while running, in order.
    pub log: Log,
    /// Text edits keyed by the file they apply to.
    pub edits: BTreeMap<PathBuf, EditSet>,
    /// File creations, deletions and renames, in order.
    pub fs_changes: Vec<FsChange>,
}

impl TransformationResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A named source rewrite.
///
/// Implementations must not panic on bad input: problems are reported as
/// [`crate::Severity::Error`] entries in the returned log.
pub trait Transformation: Send + Sync {
    /// Describes the transformation and its parameters.
    fn description(&self) -> Description;

    /// Computes the edits for the configured selection.
    ///
    /// Runs synchronously and may take arbitrary time.
    fn run(&self, config: &TransformationConfig) -> TransformationResult;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("in_testing", Some(Quality::InTesting))]
    #[case("in_development", Some(Quality::InDevelopment))]
    #[case("production", Some(Quality::Production))]
    #[case("Production", None)]
    #[case("stable", None)]
    fn parses_quality(#[case] input: &str, #[case] expected: Option<Quality>) {
        assert_eq!(Quality::parse(input), expected);
    }

    #[rstest]
    #[case(ParamValue::Text(String::new()), "string")]
    #[case(ParamValue::Bool(false), "bool")]
    #[case(ParamValue::Int(3), "int")]
    fn reports_parameter_types(#[case] value: ParamValue, #[case] expected: &str) {
        assert_eq!(value.type_name(), expected);
    }

    #[test]
    fn parameter_values_serialise_untagged() {
        let json = serde_json::to_string(&ParamValue::Bool(true)).expect("serialise");
        assert_eq!(json, "true");
    }
}
