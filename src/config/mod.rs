//! Option schema and loader configuration
//!
//! - `OptionSchema` - The recognized options with their types and defaults
//! - `OptionSpec` - Type, default and allowed values of one option
//! - `LoaderConfig` - Where and how [`ConfigLoader`](crate::ConfigLoader) reads options

mod schema;
mod types;

pub use schema::{
    OptionChoice, OptionSchema, OptionSchemaBuilder, OptionSpec, OptionType, choice, keys,
};

pub use types::{DefaultEnvSource, EnvSource, LoaderConfig, LoaderConfigBuilder};
