//! Reading, validating and resolving an options file
//!
//! The loader never searches for a file: the path comes from
//! [`LoaderConfig::config_file`]. Layers are applied in this order:
//!
//! 1. Options file (absent or blank file = no options)
//! 2. Environment variable overrides (if a prefix is configured)
//!
//! The combined options are then validated and resolved, with the configured
//! preset sitting between the schema defaults and the user layers.

use crate::config::{LoaderConfig, OptionSchema};
use crate::engine;
use crate::env::EnvironmentHandler;
use crate::error::{Error, Result};
use crate::resolve::{Resolution, Resolver};
use crate::storage::{JsonStorage, StorageBackend};
use crate::validate::{RawOptions, Validator};

use log::{debug, info, warn};
use serde_json::Value;
use std::path::Path;

/// Loads user options and turns them into a [`Resolution`]
///
/// # Example
///
/// ```rust,no_run
/// use lintconf::{ConfigLoader, LoaderConfig};
///
/// let loader = ConfigLoader::new(
///     LoaderConfig::builder()
///         .config_file("lintconf.json")
///         .with_env_prefix("LINTCONF")
///         .build(),
/// );
///
/// match loader.load() {
///     Ok(resolution) => {
///         for line in resolution.changelog() {
///             println!("{line}");
///         }
///     }
///     Err(lintconf::Error::Validation(report)) => {
///         eprintln!("{report}");
///         std::process::exit(1);
///     }
///     Err(e) => panic!("{e}"),
/// }
/// ```
pub struct ConfigLoader<'s, S: StorageBackend = JsonStorage> {
    config: LoaderConfig<S>,
    schema: &'s OptionSchema,
    env: EnvironmentHandler,
}

impl<S: StorageBackend> ConfigLoader<'static, S> {
    /// Loader over the built-in schema
    pub fn new(config: LoaderConfig<S>) -> Self {
        ConfigLoader::with_schema(config, OptionSchema::builtin())
    }
}

impl<'s, S: StorageBackend> ConfigLoader<'s, S> {
    /// Loader over a custom schema
    pub fn with_schema(config: LoaderConfig<S>, schema: &'s OptionSchema) -> Self {
        let env = EnvironmentHandler::new(config.env_prefix.clone(), config.env_source.clone());
        Self {
            config,
            schema,
            env,
        }
    }

    pub fn config(&self) -> &LoaderConfig<S> {
        &self.config
    }

    /// Read the options file and overlay environment overrides, without validating
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// its root is not a table/object.
    pub fn load_raw(&self) -> Result<RawOptions> {
        let path = &self.config.config_file;

        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|e| Error::FileRead {
                path: path.display().to_string(),
                source: e,
            })?
        } else {
            debug!("Options file {} not found, using defaults", path.display());
            String::new()
        };

        let mut raw = if content.trim().is_empty() {
            RawOptions::new()
        } else {
            let value: Value = self.config.storage.deserialize(&content)?;
            match value {
                Value::Object(map) => map,
                Value::Null => RawOptions::new(),
                other => {
                    return Err(Error::Parse(format!(
                        "expected an object at the root of '{}', found {other}",
                        path.display()
                    )));
                }
            }
        };

        for (key, value) in self.env.overrides(self.schema) {
            raw.insert(key, value);
        }

        Ok(raw)
    }

    /// Load, validate and resolve the options
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with every problem found if the options
    /// are invalid, [`Error::InvalidPreset`] if the configured preset does not
    /// fit the schema, or any error from [`ConfigLoader::load_raw`].
    pub fn load(&self) -> Result<Resolution> {
        let raw = self.load_raw()?;

        let validated = Validator::new(self.schema).check(&raw).map_err(|report| {
            for error in &report {
                warn!("Invalid option {error}");
            }
            Error::Validation(report)
        })?;

        let mut resolver = Resolver::new(self.schema);
        if let Some(preset) = &self.config.preset {
            resolver = resolver.with_preset(preset.clone())?;
        }

        let resolution = resolver.resolve(&validated)?;
        info!(
            "Options resolved from {} ({} override(s))",
            self.config.config_file.display(),
            resolution.overrides.len()
        );
        Ok(resolution)
    }

    /// Write the resolved options to `path` in this loader's format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn export(&self, resolution: &Resolution, path: &Path) -> Result<()> {
        self.config.storage.write(path, &resolution.config)?;
        debug!("Resolved options written to {}", path.display());
        Ok(())
    }

    /// Write the rule engine's option object to `path` in this loader's format
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the loader's schema is not the built-in one,
    /// or an error if the write fails.
    pub fn export_engine_options(&self, resolution: &Resolution, path: &Path) -> Result<()> {
        let options = engine::to_engine_options(&resolution.config)?;
        self.config.storage.write(path, &options)?;
        debug!("Engine options written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(
            LoaderConfig::builder()
                .config_file(dir.path().join("absent.json"))
                .build(),
        );

        assert!(loader.load_raw().unwrap().is_empty());
        let resolution = loader.load().unwrap();
        assert_eq!(resolution.config, OptionSchema::builtin().defaults());
    }

    #[test]
    fn test_blank_file_means_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "  \n\t\n").unwrap();

        let loader = ConfigLoader::new(LoaderConfig::builder().config_file(&path).build());
        assert!(loader.load_raw().unwrap().is_empty());
        assert_eq!(loader.load().unwrap().config, OptionSchema::builtin().defaults());
    }

    #[test]
    fn test_non_object_root_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let loader = ConfigLoader::new(LoaderConfig::builder().config_file(&path).build());
        let err = loader.load_raw().unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_env_wins_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"quoteStyle": "double", "enableFormatters": true}"#).unwrap();

        let mut vars = HashMap::new();
        vars.insert("LC_QUOTE_STYLE".to_string(), "single".to_string());

        let loader = ConfigLoader::new(
            LoaderConfig::builder()
                .config_file(&path)
                .with_env_prefix("LC")
                .with_env_source(vars)
                .build(),
        );

        let raw = loader.load_raw().unwrap();
        assert_eq!(raw["quoteStyle"], json!("single"));

        let resolution = loader.load().unwrap();
        assert_eq!(resolution.config["quoteStyle"], json!("single"));
        assert_eq!(resolution.config["enableFormatters"], json!(true));
    }

    #[test]
    fn test_invalid_options_report_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"fooBar": 1, "quoteStyle": "triple"}"#).unwrap();

        let loader = ConfigLoader::new(LoaderConfig::builder().config_file(&path).build());
        let err = loader.load().unwrap_err();

        let report = err.report().unwrap();
        assert_eq!(report.len(), 2);
        assert!(err.is_user_error());
    }

    #[test]
    fn test_invalid_preset_surfaces() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(
            LoaderConfig::builder()
                .config_file(dir.path().join("absent.json"))
                .with_preset(Preset::new("broken").set("tabs", true))
                .build(),
        );

        assert!(matches!(loader.load().unwrap_err(), Error::InvalidPreset { .. }));
    }
}
