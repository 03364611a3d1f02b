//! Typed view of a resolved config and its rendering into the rule engine's
//! option object
//!
//! The engine expects its own option layout, which differs from the flat
//! option keys users write:
//!
//! ```json
//! {
//!   "vue": { "overrides": { "vue/block-order": ["error", { "order": ["template", "script", "style"] }] } },
//!   "stylistic": { "quotes": "double" },
//!   "formatters": true,
//!   "lessOpinionated": true
//! }
//! ```

use crate::error::Result;
use crate::resolve::ResolvedConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Rule id that enforces block order
pub const BLOCK_ORDER_RULE: &str = "vue/block-order";

/// Section of a single-file component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    Template,
    Script,
    Style,
}

/// Quoting character preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

/// How ambiguous rules are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrictnessLevel {
    #[default]
    Strict,
    Relaxed,
}

/// Typed form of a config resolved against the built-in schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterOptions {
    pub block_order: Vec<Block>,
    pub quote_style: QuoteStyle,
    pub enable_formatters: bool,
    pub strictness_level: StrictnessLevel,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            block_order: vec![Block::Template, Block::Script, Block::Style],
            quote_style: QuoteStyle::Single,
            enable_formatters: false,
            strictness_level: StrictnessLevel::Strict,
        }
    }
}

impl FormatterOptions {
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) if `config` was not
    /// resolved against the built-in schema.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        config.typed()
    }

    /// Render in the engine's option layout
    pub fn to_engine_options(&self) -> Value {
        json!({
            "vue": {
                "overrides": {
                    BLOCK_ORDER_RULE: ["error", { "order": self.block_order }],
                },
            },
            "stylistic": {
                "quotes": self.quote_style,
            },
            "formatters": self.enable_formatters,
            "lessOpinionated": self.strictness_level == StrictnessLevel::Relaxed,
        })
    }
}

/// Render a resolved config in the engine's option layout
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) if `config` does not have the
/// built-in options.
pub fn to_engine_options(config: &ResolvedConfig) -> Result<Value> {
    Ok(FormatterOptions::from_config(config)?.to_engine_options())
}
