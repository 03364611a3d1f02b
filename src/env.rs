//! Environment variable overrides
//!
//! With a prefix of `LINTCONF`, the option `quoteStyle` is read from
//! `LINTCONF_QUOTE_STYLE`. Values are parsed as JSON first, so lists are
//! written as `["script","template"]`; anything that is not JSON falls back to
//! bool, number and finally plain string.

use crate::config::{EnvSource, OptionSchema};
use crate::validate::RawOptions;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

/// Handles environment variable lookups and parsing
pub struct EnvironmentHandler {
    prefix: Option<String>,
    source: Arc<dyn EnvSource>,
}

impl EnvironmentHandler {
    pub fn new(prefix: Option<String>, source: Arc<dyn EnvSource>) -> Self {
        Self { prefix, source }
    }

    /// Get the environment variable name for an option key
    ///
    /// Returns None if env var overrides are disabled.
    /// Format: {PREFIX}_{SCREAMING_SNAKE_KEY}
    pub fn get_env_var_name(&self, key: &str) -> Option<String> {
        self.prefix
            .as_ref()
            .map(|prefix| format!("{}_{}", prefix.to_uppercase(), screaming_snake(key)))
    }

    /// Parsed override for `key`, if its variable is set
    pub fn get_env_override(&self, key: &str) -> Option<Value> {
        let env_var_name = self.get_env_var_name(key)?;
        self.source.var(&env_var_name).map(|env_value| {
            serde_json::from_str(&env_value).unwrap_or_else(|_| {
                if env_value.eq_ignore_ascii_case("true") {
                    Value::Bool(true)
                } else if env_value.eq_ignore_ascii_case("false") {
                    Value::Bool(false)
                } else if let Ok(n) = env_value.parse::<i64>() {
                    Value::Number(n.into())
                } else if let Ok(n) = env_value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map_or_else(|| Value::String(env_value.clone()), Value::Number)
                } else {
                    Value::String(env_value)
                }
            })
        })
    }

    /// Every set override for the options in `schema`, in schema order
    pub fn overrides(&self, schema: &OptionSchema) -> RawOptions {
        let mut found = RawOptions::new();
        for key in schema.keys() {
            if let Some(value) = self.get_env_override(key) {
                debug!("Option {key} overridden by env var");
                found.insert(key.to_string(), value);
            }
        }
        found
    }
}

/// `blockOrder` -> `BLOCK_ORDER`
fn screaming_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}
