//! Validation of user-supplied options against an [`OptionSchema`]
//!
//! Validation is exhaustive: every problem in the input is collected, in
//! input-key order, so the caller can report them all at once.
//!
//! ```rust
//! use lintconf::{PathSegment, ValidationErrorKind, Validator};
//! use serde_json::json;
//!
//! let raw = json!({"fooBar": 1, "quoteStyle": "triple"});
//! let report = Validator::builtin().validate(raw.as_object().unwrap());
//!
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.errors()[0].option_path, vec![PathSegment::key("fooBar")]);
//! assert!(matches!(report.errors()[1].kind, ValidationErrorKind::ValueNotAllowed { .. }));
//! ```

use crate::config::{OptionSchema, OptionSpec, OptionType};
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// User-supplied, possibly partial and possibly invalid options.
///
/// Keys keep their input order.
pub type RawOptions = Map<String, Value>;

// =============================================================================
// Validation Errors
// =============================================================================

/// One step of the path to an offending value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Option key
    Key(String),
    /// Element of a list option
    Index(usize),
}

impl PathSegment {
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Why a value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationErrorKind {
    /// Key is not registered in the schema
    UnknownOption,
    /// Value has the wrong JSON shape
    TypeMismatch { expected: String },
    /// Value has the right shape but is not one of the allowed values
    ValueNotAllowed { allowed: Vec<String> },
    /// List element appears more than once
    DuplicateValue,
}

/// A single rejected value with its location in the input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Location of the offending value, starting with the option key
    pub option_path: Vec<PathSegment>,
    /// Reason for rejection
    pub kind: ValidationErrorKind,
    /// The rejected value as supplied
    pub offending_value: Value,
}

impl ValidationError {
    /// Option key this error belongs to
    pub fn key(&self) -> &str {
        match self.option_path.first() {
            Some(PathSegment::Key(key)) => key,
            _ => "",
        }
    }

    /// Dotted path, e.g. `blockOrder[1]`
    pub fn path_string(&self) -> String {
        self.option_path.iter().map(ToString::to_string).collect()
    }

    /// Description of the problem without the location
    pub fn message(&self) -> String {
        match &self.kind {
            ValidationErrorKind::UnknownOption => "unknown option".to_string(),
            ValidationErrorKind::TypeMismatch { expected } => {
                format!(
                    "expected {expected}, found {}",
                    json_type_name(&self.offending_value)
                )
            }
            ValidationErrorKind::ValueNotAllowed { allowed } => {
                format!(
                    "{} is not allowed (expected one of: {})",
                    self.offending_value,
                    allowed.join(", ")
                )
            }
            ValidationErrorKind::DuplicateValue => {
                format!("{} is listed more than once", self.offending_value)
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message())
    }
}

/// All problems found in one validation call, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {error}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Options that passed validation against a specific schema
///
/// Only [`Validator::check`] creates this, so holding one proves the options
/// are valid for `schema`.
#[derive(Debug, Clone)]
pub struct ValidatedOptions<'s> {
    schema: &'s OptionSchema,
    options: RawOptions,
}

impl<'s> ValidatedOptions<'s> {
    pub fn options(&self) -> &RawOptions {
        &self.options
    }

    pub(crate) fn schema(&self) -> &'s OptionSchema {
        self.schema
    }
}

/// Checks [`RawOptions`] against an [`OptionSchema`]
#[derive(Debug, Clone, Copy)]
pub struct Validator<'s> {
    schema: &'s OptionSchema,
}

impl<'s> Validator<'s> {
    pub fn new(schema: &'s OptionSchema) -> Self {
        Self { schema }
    }

    /// Validator over [`OptionSchema::builtin`]
    pub fn builtin() -> Validator<'static> {
        Validator::new(OptionSchema::builtin())
    }

    /// Collect every violation in `raw`
    ///
    /// An empty report means the options are valid.
    pub fn validate(&self, raw: &RawOptions) -> ValidationReport {
        let mut errors = Vec::new();

        for (key, value) in raw {
            match self.schema.get(key) {
                Some(spec) => check_value(key, spec, value, &mut errors),
                None => errors.push(ValidationError {
                    option_path: vec![PathSegment::key(key.as_str())],
                    kind: ValidationErrorKind::UnknownOption,
                    offending_value: value.clone(),
                }),
            }
        }

        debug!(
            "Validated {} option(s), {} error(s)",
            raw.len(),
            errors.len()
        );
        ValidationReport { errors }
    }

    /// Validate and, on success, return the proof token the resolver needs
    ///
    /// # Errors
    ///
    /// Returns the full report if any option is invalid.
    pub fn check(&self, raw: &RawOptions) -> Result<ValidatedOptions<'s>, ValidationReport> {
        let report = self.validate(raw);
        if report.is_empty() {
            Ok(ValidatedOptions {
                schema: self.schema,
                options: raw.clone(),
            })
        } else {
            Err(report)
        }
    }
}

/// Append every violation of `value` against `spec` to `errors`
pub(crate) fn check_value(
    key: &str,
    spec: &OptionSpec,
    value: &Value,
    errors: &mut Vec<ValidationError>,
) {
    let path = vec![PathSegment::key(key)];

    match spec.option_type {
        OptionType::Toggle => {
            if !value.is_boolean() {
                errors.push(type_mismatch(path, spec.option_type.expected(), value));
            }
        }
        OptionType::Select => match value.as_str() {
            None => errors.push(type_mismatch(path, spec.option_type.expected(), value)),
            Some(s) if !spec.allows(s) => errors.push(not_allowed(path, spec, value)),
            Some(_) => {}
        },
        OptionType::List => {
            let Some(items) = value.as_array() else {
                errors.push(type_mismatch(path, spec.option_type.expected(), value));
                return;
            };

            let mut seen = HashSet::new();
            for (i, item) in items.iter().enumerate() {
                let mut item_path = path.clone();
                item_path.push(PathSegment::Index(i));

                match item.as_str() {
                    None => errors.push(type_mismatch(item_path, "string", item)),
                    Some(s) if !spec.allows(s) => errors.push(not_allowed(item_path, spec, item)),
                    Some(s) if !seen.insert(s) => errors.push(ValidationError {
                        option_path: item_path,
                        kind: ValidationErrorKind::DuplicateValue,
                        offending_value: item.clone(),
                    }),
                    Some(_) => {}
                }
            }
        }
    }
}

fn type_mismatch(path: Vec<PathSegment>, expected: &str, value: &Value) -> ValidationError {
    ValidationError {
        option_path: path,
        kind: ValidationErrorKind::TypeMismatch {
            expected: expected.to_string(),
        },
        offending_value: value.clone(),
    }
}

fn not_allowed(path: Vec<PathSegment>, spec: &OptionSpec, value: &Value) -> ValidationError {
    ValidationError {
        option_path: path,
        kind: ValidationErrorKind::ValueNotAllowed {
            allowed: spec.allowed_values().into_iter().map(String::from).collect(),
        },
        offending_value: value.clone(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================
