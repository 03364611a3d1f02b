//! # lintconf
//!
//! Schema-driven option validation and resolution for a rule-based
//! formatting/lint engine.
//!
//! ## Features
//!
//! - **Option Schema**: Every recognized option with its type, allowed values and default
//! - **Exhaustive Validation**: All problems reported at once, each with its option path
//! - **Deterministic Resolution**: User values over preset bundles over schema defaults,
//!   with a change log of every override
//! - **Presets**: Documented default-bundles such as `lessOpinionated`
//! - **Engine Rendering**: Emit the option object the rule engine consumes
//! - **Loader**: JSON/TOML/YAML options files plus environment variable overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let raw = json!({"quoteStyle": "double", "enableFormatters": true});
//! let resolution = lintconf::resolve(raw.as_object().unwrap())?;
//!
//! assert_eq!(resolution.config["quoteStyle"], "double");
//! assert_eq!(resolution.config["strictnessLevel"], "strict");
//! assert_eq!(
//!     resolution.changelog(),
//!     vec!["quoteStyle: \"single\" -> \"double\"", "enableFormatters: false -> true"],
//! );
//! # Ok::<(), lintconf::Error>(())
//! ```
//!
//! ## Reporting Invalid Options
//!
//! ```rust
//! use serde_json::json;
//!
//! let raw = json!({"fooBar": 1, "quoteStyle": "triple"});
//! let report = lintconf::validate(raw.as_object().unwrap());
//!
//! assert_eq!(report.len(), 2);
//! for error in &report {
//!     eprintln!("{error}");
//! }
//! ```
//!
//! ## Loading From a File
//!
//! ```rust,no_run
//! use lintconf::{ConfigLoader, LoaderConfig, Preset};
//!
//! # fn example() -> lintconf::Result<()> {
//! let loader = ConfigLoader::new(
//!     LoaderConfig::builder()
//!         .config_file("lintconf.json")
//!         .with_env_prefix("LINTCONF")
//!         .with_preset(Preset::less_opinionated())
//!         .build(),
//! );
//!
//! let resolution = loader.load()?;
//! loader.export_engine_options(&resolution, "engine-options.json".as_ref())?;
//! # Ok(())
//! # }
//! ```

// Core modules
mod docs;
mod engine;
mod env;
mod error;
mod loader;
mod preset;
mod resolve;
pub mod storage;
mod validate;

// Grouped modules
pub mod config;

// Re-exports from core
pub use docs::{DocsConfig, generate_docs};
pub use engine::{
    BLOCK_ORDER_RULE, Block, FormatterOptions, QuoteStyle, StrictnessLevel, to_engine_options,
};
pub use env::EnvironmentHandler;
pub use error::{Error, Result};
pub use loader::ConfigLoader;
pub use preset::Preset;
pub use resolve::{Override, OverrideSource, Resolution, ResolvedConfig, Resolver};
pub use storage::{JsonStorage, StorageBackend};
pub use validate::{
    PathSegment, RawOptions, ValidatedOptions, ValidationError, ValidationErrorKind,
    ValidationReport, Validator,
};

#[cfg(feature = "toml")]
pub use storage::TomlStorage;

#[cfg(feature = "yaml")]
pub use storage::YamlStorage;

// Re-exports from config
pub use config::{
    DefaultEnvSource, EnvSource, LoaderConfig, LoaderConfigBuilder, OptionChoice, OptionSchema,
    OptionSchemaBuilder, OptionSpec, OptionType, choice, keys,
};

/// Validate `raw` against the built-in schema
///
/// An empty report means the options are valid.
pub fn validate(raw: &RawOptions) -> ValidationReport {
    Validator::builtin().validate(raw)
}

/// Validate and resolve `raw` against the built-in schema
///
/// # Errors
///
/// Returns [`Error::Validation`] with every problem found if `raw` is invalid.
pub fn resolve(raw: &RawOptions) -> Result<Resolution> {
    let validated = Validator::builtin().check(raw).map_err(Error::Validation)?;
    Resolver::builtin().resolve(&validated)
}
