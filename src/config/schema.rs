//! Option schema: the statically defined set of legal configuration keys
//!
//! # Overview
//!
//! Every option the rule engine understands is registered here with:
//!
//! - **Type**: `Toggle` (boolean), `Select` (one string from a fixed set) or
//!   `List` (ordered, duplicate-free sequence of strings from a fixed set)
//! - **Default**: the value used when the user does not set the option
//! - **Allowed values**: the choices for `Select` and `List` options
//!
//! The schema is immutable once built. The built-in schema is constructed on
//! first use and shared for the rest of the process:
//!
//! ```rust
//! use lintconf::{OptionSchema, OptionType};
//!
//! let schema = OptionSchema::builtin();
//! let quotes = schema.describe("quoteStyle").unwrap();
//!
//! assert_eq!(quotes.option_type, OptionType::Select);
//! assert_eq!(quotes.default, "single");
//! assert_eq!(quotes.allowed_values(), vec!["single", "double"]);
//! ```
//!
//! # Custom Schemas
//!
//! ```rust
//! use lintconf::{options, OptionSpec, choice};
//!
//! let schema = options! {
//!     "indentStyle" => OptionSpec::select("space", vec![
//!         choice("space", "Indent with spaces"),
//!         choice("tab", "Indent with tabs"),
//!     ]),
//!     "semicolons" => OptionSpec::toggle(false),
//! }
//! .unwrap();
//!
//! assert_eq!(schema.len(), 2);
//! ```

use crate::error::{Error, Result};
use crate::resolve::ResolvedConfig;
use crate::validate::check_value;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

// =============================================================================
// Built-in Option Keys
// =============================================================================

/// Keys of the built-in options.
pub mod keys {
    /// Relative order of the template/script/style blocks
    pub const BLOCK_ORDER: &str = "blockOrder";
    /// Preferred quoting character
    pub const QUOTE_STYLE: &str = "quoteStyle";
    /// Auxiliary formatting pass
    pub const ENABLE_FORMATTERS: &str = "enableFormatters";
    /// How aggressively ambiguous rules are reported
    pub const STRICTNESS_LEVEL: &str = "strictnessLevel";
}

/// Option keys are lower camel case identifiers (e.g. `quoteStyle`).
const KEY_PATTERN: &str = r"^[a-z][A-Za-z0-9]*$";

/// Compiled [`KEY_PATTERN`], shared by every schema build
///
/// # Panics
///
/// Never in practice: the pattern is a constant covered by the unit tests.
fn key_pattern() -> &'static Regex {
    static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
    KEY_REGEX.get_or_init(|| Regex::new(KEY_PATTERN).expect("KEY_PATTERN is a valid regex"))
}

// =============================================================================
// Option Types
// =============================================================================

/// Value type of an option
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Boolean switch
    #[default]
    Toggle,
    /// One string out of the allowed values
    Select,
    /// Ordered list of distinct strings out of the allowed values
    List,
}

impl OptionType {
    /// Human readable name of the JSON shape this type accepts
    #[must_use]
    pub fn expected(&self) -> &'static str {
        match self {
            OptionType::Toggle => "boolean",
            OptionType::Select => "string",
            OptionType::List => "array of strings",
        }
    }
}

// =============================================================================
// Allowed Values
// =============================================================================

/// One allowed value of a `Select` or `List` option
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionChoice {
    /// Value as written in the options file
    pub value: String,
    /// What picking this value does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionChoice {
    /// Create a choice without description
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    /// Create a choice with a description
    pub fn with_description(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: Some(description.into()),
        }
    }
}

/// Shorthand for [`OptionChoice::with_description`]
///
/// # Example
/// ```rust
/// use lintconf::choice;
/// let choices = vec![choice("single", "Prefer 'x'"), choice("double", "Prefer \"x\"")];
/// ```
pub fn choice(value: impl Into<String>, description: impl Into<String>) -> OptionChoice {
    OptionChoice::with_description(value, description)
}

// =============================================================================
// Option Spec
// =============================================================================

/// Type, default and constraints of a single option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Value type
    #[serde(rename = "type")]
    pub option_type: OptionType,

    /// Value used when the option is not set
    pub default: Value,

    /// Allowed values (`Select` and `List` only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,

    /// What the option does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Grouping used by the docs generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl OptionSpec {
    /// Create a boolean option
    pub fn toggle(default: bool) -> Self {
        Self {
            option_type: OptionType::Toggle,
            default: Value::Bool(default),
            choices: Vec::new(),
            description: None,
            category: None,
        }
    }

    /// Create a single-choice option
    ///
    /// **Choices are required** and the default must be one of them.
    pub fn select(default: impl Into<String>, choices: Vec<OptionChoice>) -> Self {
        Self {
            option_type: OptionType::Select,
            default: Value::String(default.into()),
            choices,
            ..Self::toggle(false)
        }
    }

    /// Create an ordered list option
    pub fn list(default: &[&str], choices: Vec<OptionChoice>) -> Self {
        Self {
            option_type: OptionType::List,
            default: json!(default),
            choices,
            ..Self::toggle(false)
        }
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the docs category
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Allowed values in declaration order
    pub fn allowed_values(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.value.as_str()).collect()
    }

    /// Check whether `value` is one of the allowed values
    pub fn allows(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }

    /// Validate the spec definition itself
    ///
    /// Checks that:
    /// - `Toggle` has no choices, `Select` and `List` have at least one
    /// - Choices are distinct
    /// - The default satisfies the spec's own constraints
    pub fn validate_schema(&self) -> std::result::Result<(), String> {
        match self.option_type {
            OptionType::Toggle if !self.choices.is_empty() => {
                return Err("Toggle options cannot define choices".to_string());
            }
            OptionType::Select | OptionType::List if self.choices.is_empty() => {
                return Err(format!(
                    "{:?} options must define at least one choice",
                    self.option_type
                ));
            }
            _ => {}
        }

        let mut seen = HashSet::new();
        for choice in &self.choices {
            if !seen.insert(choice.value.as_str()) {
                return Err(format!("Duplicate choice '{}'", choice.value));
            }
        }

        let mut violations = Vec::new();
        check_value("default", self, &self.default, &mut violations);
        if let Some(first) = violations.first() {
            return Err(format!("Default value is invalid: {}", first.message()));
        }

        Ok(())
    }
}

// =============================================================================
// Option Schema
// =============================================================================

/// Ordered registry of every recognized option
///
/// Declaration order is preserved and used for [`ResolvedConfig`] key order
/// and generated docs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSchema {
    entries: Vec<(String, OptionSpec)>,
    index: HashMap<String, usize>,
}

impl OptionSchema {
    /// Create a builder for a custom schema
    pub fn builder() -> OptionSchemaBuilder {
        OptionSchemaBuilder::default()
    }

    /// The process-wide built-in schema
    ///
    /// Built once on first access and never mutated afterwards.
    pub fn builtin() -> &'static OptionSchema {
        static BUILTIN: OnceLock<OptionSchema> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::from_entries(builtin_entries()))
    }

    fn from_entries(entries: Vec<(String, OptionSpec)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Look up an option
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] if `key` is not registered.
    pub fn describe(&self, key: &str) -> Result<&OptionSpec> {
        self.get(key)
            .ok_or_else(|| Error::UnknownOption(key.to_string()))
    }

    /// Look up an option, `None` if not registered
    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Option keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Options in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.entries.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configuration made of every option's default
    pub fn defaults(&self) -> ResolvedConfig {
        let values: Map<String, Value> = self
            .iter()
            .map(|(key, spec)| (key.to_string(), spec.default.clone()))
            .collect();
        ResolvedConfig::from_values(values)
    }

    /// Distinct categories, sorted
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .entries
            .iter()
            .filter_map(|(_, spec)| spec.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

impl Serialize for OptionSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, spec) in &self.entries {
            map.serialize_entry(key, spec)?;
        }
        map.end()
    }
}

/// Builder for [`OptionSchema`]
#[derive(Debug, Clone, Default)]
pub struct OptionSchemaBuilder {
    entries: Vec<(String, OptionSpec)>,
}

impl OptionSchemaBuilder {
    /// Register an option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, spec: OptionSpec) -> Self {
        self.entries.push((key.into(), spec));
        self
    }

    /// Validate every registered spec and build the schema
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptionSpec`] if a key is malformed or repeated,
    /// or if a spec fails [`OptionSpec::validate_schema`].
    pub fn build(self) -> Result<OptionSchema> {
        let mut seen = HashSet::new();

        for (key, spec) in &self.entries {
            if !key_pattern().is_match(key) {
                return Err(Error::InvalidOptionSpec {
                    key: key.clone(),
                    reason: format!("key must match {KEY_PATTERN}"),
                });
            }
            if !seen.insert(key.as_str()) {
                return Err(Error::InvalidOptionSpec {
                    key: key.clone(),
                    reason: "option registered twice".to_string(),
                });
            }
            spec.validate_schema()
                .map_err(|reason| Error::InvalidOptionSpec {
                    key: key.clone(),
                    reason,
                })?;
        }

        Ok(OptionSchema::from_entries(self.entries))
    }
}

fn builtin_entries() -> Vec<(String, OptionSpec)> {
    vec![
        (
            keys::BLOCK_ORDER.to_string(),
            OptionSpec::list(
                &["template", "script", "style"],
                vec![
                    choice("template", "Markup block"),
                    choice("script", "Component logic block"),
                    choice("style", "Stylesheet block"),
                ],
            )
            .description("Required relative order of the blocks in a single-file component")
            .category("vue"),
        ),
        (
            keys::QUOTE_STYLE.to_string(),
            OptionSpec::select(
                "single",
                vec![
                    choice("single", "Prefer single quotes"),
                    choice("double", "Prefer double quotes"),
                ],
            )
            .description("Quoting character the formatter prefers")
            .category("stylistic"),
        ),
        (
            keys::ENABLE_FORMATTERS.to_string(),
            OptionSpec::toggle(false)
                .description("Run the auxiliary formatters for non-script files")
                .category("formatters"),
        ),
        (
            keys::STRICTNESS_LEVEL.to_string(),
            OptionSpec::select(
                "strict",
                vec![
                    choice("strict", "Report ambiguous patterns as violations"),
                    choice("relaxed", "Only report unambiguous violations"),
                ],
            )
            .description("How aggressively ambiguous rules are treated as violations")
            .category("general"),
        ),
    ]
}

/// Macro for building an [`OptionSchema`] more cleanly
///
/// Expands to a builder chain and evaluates to `Result<OptionSchema>`.
///
/// # Example
/// ```rust
/// use lintconf::{options, OptionSpec};
///
/// let schema = options! {
///     "semicolons" => OptionSpec::toggle(true).category("stylistic"),
/// }
/// .unwrap();
/// assert!(schema.contains("semicolons"));
/// ```
#[macro_export]
macro_rules! options {
    ($($key:expr => $value:expr),* $(,)?) => {{
        $crate::OptionSchema::builder()
            $(.option($key, $value))*
            .build()
    }};
}

// =============================================================================
// Tests
// =============================================================================
