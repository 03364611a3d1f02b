//! Merging validated options onto schema defaults
//!
//! Precedence, lowest to highest:
//!
//! 1. Schema defaults
//! 2. Preset bundle (if the resolver has one)
//! 3. User options
//!
//! Each layer replaces an option's value wholesale. Lists are never merged
//! element-wise.

use crate::config::OptionSchema;
use crate::error::{Error, Result};
use crate::preset::Preset;
use crate::validate::{RawOptions, ValidatedOptions, Validator};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Resolved Config
// =============================================================================

/// Every schema option mapped to its effective value, in schema order
///
/// Only a [`Resolver`] builds one, so every schema key is present and every
/// value has passed validation. A saved config is read back by validating and
/// resolving it again; there is no way to deserialize one directly:
///
/// ```compile_fail
/// let forged: lintconf::ResolvedConfig =
///     serde_json::from_str(r#"{"quoteStyle": "triple"}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    values: Map<String, Value>,
}

impl ResolvedConfig {
    pub(crate) fn from_values(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy the values out as input options, e.g. to feed them back into a resolver
    pub fn to_raw(&self) -> RawOptions {
        self.values.clone()
    }

    /// Deserialize into a typed view such as [`FormatterOptions`](crate::FormatterOptions)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the values do not fit `T`.
    pub fn typed<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.values.clone()))
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

static NULL: Value = Value::Null;

/// Keys outside the schema index to [`Value::Null`], like `serde_json::Value`
impl std::ops::Index<&str> for ResolvedConfig {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NULL)
    }
}

// =============================================================================
// Override Diagnostics
// =============================================================================

/// Layer that changed an option's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layer", content = "name", rename_all = "lowercase")]
pub enum OverrideSource {
    /// Named preset bundle
    Preset(String),
    /// User options
    User,
}

/// One value change applied during resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Override {
    pub key: String,
    /// Value before this layer was applied
    pub previous: Value,
    pub new: Value,
    pub source: OverrideSource,
}

impl Override {
    /// `(key, previous, new)` view
    pub fn as_tuple(&self) -> (&str, &Value, &Value) {
        (&self.key, &self.previous, &self.new)
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.key, self.previous, self.new)?;
        if let OverrideSource::Preset(name) = &self.source {
            write!(f, " (preset '{name}')")?;
        }
        Ok(())
    }
}

/// Result of a resolution: the config plus the changes that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub config: ResolvedConfig,
    /// Preset changes first, then user changes in input order
    pub overrides: Vec<Override>,
}

impl Resolution {
    pub fn into_config(self) -> ResolvedConfig {
        self.config
    }

    /// Human readable change log, one line per override
    pub fn changelog(&self) -> Vec<String> {
        self.overrides.iter().map(ToString::to_string).collect()
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Produces a [`ResolvedConfig`] from validated options
///
/// # Example
///
/// ```rust
/// use lintconf::{Resolver, Validator};
/// use serde_json::json;
///
/// let raw = json!({"quoteStyle": "double"});
/// let validated = Validator::builtin().check(raw.as_object().unwrap()).unwrap();
///
/// let resolution = Resolver::builtin().resolve(&validated)?;
/// assert_eq!(resolution.config["quoteStyle"], "double");
/// assert_eq!(resolution.config["strictnessLevel"], "strict");
/// # Ok::<(), lintconf::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<'s> {
    schema: &'s OptionSchema,
    preset: Option<Preset>,
}

impl<'s> Resolver<'s> {
    pub fn new(schema: &'s OptionSchema) -> Self {
        Self {
            schema,
            preset: None,
        }
    }

    /// Resolver over [`OptionSchema::builtin`]
    pub fn builtin() -> Resolver<'static> {
        Resolver::new(OptionSchema::builtin())
    }

    /// Layer a preset between the schema defaults and user options
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPreset`] if the preset sets unknown options or
    /// values the schema does not allow.
    pub fn with_preset(mut self, preset: Preset) -> Result<Self> {
        let report = Validator::new(self.schema).validate(preset.values());
        if !report.is_empty() {
            return Err(Error::InvalidPreset {
                preset: preset.name().to_string(),
                report,
            });
        }
        self.preset = Some(preset);
        Ok(self)
    }

    pub fn preset(&self) -> Option<&Preset> {
        self.preset.as_ref()
    }

    /// Merge validated options onto the defaults
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] if `validated` was checked against a
    /// different schema instance than this resolver's.
    pub fn resolve(&self, validated: &ValidatedOptions<'_>) -> Result<Resolution> {
        if !std::ptr::eq(self.schema, validated.schema()) {
            return Err(Error::Precondition(
                "options were validated against a different schema".to_string(),
            ));
        }
        Ok(self.merge(validated.options()))
    }

    /// Validate and merge in one step
    ///
    /// Invalid input is treated as a caller bug: nothing is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] carrying the report if `raw` is invalid.
    pub fn resolve_raw(&self, raw: &RawOptions) -> Result<Resolution> {
        let validated = Validator::new(self.schema).check(raw).map_err(|report| {
            Error::Precondition(format!(
                "resolver called with {} invalid option(s):\n{report}",
                report.len()
            ))
        })?;
        self.resolve(&validated)
    }

    fn merge(&self, raw: &RawOptions) -> Resolution {
        let mut values = self.schema.defaults().to_raw();
        let mut overrides = Vec::new();

        if let Some(preset) = &self.preset {
            for (key, value) in preset.values() {
                apply(
                    &mut values,
                    &mut overrides,
                    key,
                    value,
                    OverrideSource::Preset(preset.name().to_string()),
                );
            }
        }

        for (key, value) in raw {
            apply(&mut values, &mut overrides, key, value, OverrideSource::User);
        }

        debug!(
            "Resolved {} option(s) with {} override(s)",
            values.len(),
            overrides.len()
        );

        Resolution {
            config: ResolvedConfig::from_values(values),
            overrides,
        }
    }
}

fn apply(
    values: &mut Map<String, Value>,
    overrides: &mut Vec<Override>,
    key: &str,
    value: &Value,
    source: OverrideSource,
) {
    // Keys were validated, so every key has a default slot.
    let Some(slot) = values.get_mut(key) else {
        return;
    };
    if *slot == *value {
        return;
    }
    let previous = std::mem::replace(slot, value.clone());
    overrides.push(Override {
        key: key.to_string(),
        previous,
        new: value.clone(),
        source,
    });
}

// =============================================================================
// Tests
// =============================================================================
