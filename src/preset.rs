//! Named default-bundles
//!
//! A preset changes several defaults at once, but never silently: every value
//! it changes shows up in the resolution's overrides with
//! [`OverrideSource::Preset`](crate::OverrideSource::Preset).
//!
//! ```rust
//! use lintconf::{Preset, Resolver};
//!
//! let resolution = Resolver::builtin()
//!     .with_preset(Preset::less_opinionated())?
//!     .resolve_raw(&Default::default())?;
//!
//! assert_eq!(resolution.config["strictnessLevel"], "relaxed");
//! # Ok::<(), lintconf::Error>(())
//! ```

use crate::config::keys;
use crate::validate::RawOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named bundle of option values layered over the schema defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    values: RawOptions,
}

impl Preset {
    /// Name of [`Preset::less_opinionated`]
    pub const LESS_OPINIONATED: &'static str = "lessOpinionated";

    /// Create an empty preset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: RawOptions::new(),
        }
    }

    /// Set an option value; later calls for the same key replace earlier ones
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &RawOptions {
        &self.values
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Relax ambiguous rules while keeping every other default
    pub fn less_opinionated() -> Self {
        Self::new(Self::LESS_OPINIONATED)
            .description("Only report unambiguous violations")
            .set(keys::STRICTNESS_LEVEL, "relaxed")
    }

    /// Look up a built-in preset by name
    ///
    /// Accepts both `lessOpinionated` and `less-opinionated`.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            Self::LESS_OPINIONATED | "less-opinionated" => Some(Self::less_opinionated()),
            _ => None,
        }
    }
}
