//! Runtime configuration for the options loader

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::preset::Preset;
use crate::storage::{JsonStorage, StorageBackend};

/// Source of environment variables
///
/// The default reads the process environment. Tests can pass a `HashMap`.
pub trait EnvSource: Send + Sync {
    /// Value of `key`, `None` if unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Configuration for [`ConfigLoader`](crate::ConfigLoader)
pub struct LoaderConfig<S: StorageBackend = JsonStorage> {
    /// Options file; a missing file means "no user options"
    pub config_file: PathBuf,

    /// Storage backend used to parse the options file and write exports
    pub storage: S,

    /// Environment variable prefix for option overrides (e.g., "LINTCONF" -> LINTCONF_QUOTE_STYLE)
    /// If None, env var overrides are disabled
    pub env_prefix: Option<String>,

    /// Where environment variables are read from
    pub env_source: Arc<dyn EnvSource>,

    /// Default-bundle layered between schema defaults and user options
    pub preset: Option<Preset>,
}

impl Default for LoaderConfig<JsonStorage> {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from("lintconf.json"),
            storage: JsonStorage::new(),
            env_prefix: None,
            env_source: Arc::new(DefaultEnvSource),
            preset: None,
        }
    }
}

impl<S: StorageBackend> std::fmt::Debug for LoaderConfig<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderConfig")
            .field("config_file", &self.config_file)
            .field("format", &self.storage.extension())
            .field("env_prefix", &self.env_prefix)
            .field("preset", &self.preset.as_ref().map(Preset::name))
            .finish()
    }
}

impl LoaderConfig<JsonStorage> {
    /// Create a new builder for LoaderConfig
    ///
    /// # Example
    /// ```rust
    /// use lintconf::{LoaderConfig, Preset};
    ///
    /// let config = LoaderConfig::builder()
    ///     .config_file("lint.options.json")
    ///     .with_env_prefix("LINTCONF")
    ///     .with_preset(Preset::less_opinionated())
    ///     .build();
    /// assert_eq!(config.env_prefix.as_deref(), Some("LINTCONF"));
    /// ```
    pub fn builder() -> LoaderConfigBuilder<JsonStorage> {
        LoaderConfigBuilder::new()
    }
}

/// Builder for creating LoaderConfig with a fluent API
#[derive(Clone)]
pub struct LoaderConfigBuilder<S: StorageBackend = JsonStorage> {
    config_file: Option<PathBuf>,
    storage: S,
    env_prefix: Option<String>,
    env_source: Arc<dyn EnvSource>,
    preset: Option<Preset>,
}

impl<S: StorageBackend> std::fmt::Debug for LoaderConfigBuilder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderConfigBuilder")
            .field("config_file", &self.config_file)
            .field("format", &self.storage.extension())
            .field("env_prefix", &self.env_prefix)
            .field("preset", &self.preset.as_ref().map(Preset::name))
            .finish()
    }
}

impl LoaderConfigBuilder<JsonStorage> {
    pub fn new() -> Self {
        Self {
            config_file: None,
            storage: JsonStorage::new(),
            env_prefix: None,
            env_source: Arc::new(DefaultEnvSource),
            preset: None,
        }
    }

    /// Use compact JSON for exports (no pretty printing)
    pub fn compact_json(mut self) -> Self {
        self.storage = JsonStorage::compact();
        self
    }
}

impl Default for LoaderConfigBuilder<JsonStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StorageBackend> LoaderConfigBuilder<S> {
    /// Set the options file
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = if path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(path.strip_prefix("~").unwrap_or(&path))
            } else {
                path
            }
        } else {
            path
        };
        self.config_file = Some(expanded);
        self
    }

    /// Switch the file format
    ///
    /// # Example
    /// ```rust,ignore
    /// use lintconf::{LoaderConfig, TomlStorage};
    ///
    /// let config = LoaderConfig::builder().with_storage::<TomlStorage>().build();
    /// assert!(config.config_file.ends_with("lintconf.toml"));
    /// ```
    pub fn with_storage<T: StorageBackend + Default>(self) -> LoaderConfigBuilder<T> {
        LoaderConfigBuilder {
            config_file: self.config_file,
            storage: T::default(),
            env_prefix: self.env_prefix,
            env_source: self.env_source,
            preset: self.preset,
        }
    }

    /// Enable environment variable overrides
    ///
    /// The format is: `{PREFIX}_{SCREAMING_SNAKE_KEY}`
    ///
    /// # Example
    /// ```rust
    /// use lintconf::LoaderConfig;
    ///
    /// let config = LoaderConfig::builder()
    ///     .with_env_prefix("LINTCONF")
    ///     .build();
    ///
    /// // Now LINTCONF_QUOTE_STYLE=double will override "quoteStyle"
    /// ```
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Read environment variables from `source` instead of the process environment
    pub fn with_env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.env_source = Arc::new(source);
        self
    }

    /// Layer a preset between the schema defaults and user options
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Build the LoaderConfig
    ///
    /// If `config_file` is not set, uses `lintconf.<ext>` in the current directory.
    pub fn build(self) -> LoaderConfig<S> {
        let config_file = self
            .config_file
            .unwrap_or_else(|| PathBuf::from(format!("lintconf.{}", self.storage.extension())));

        LoaderConfig {
            config_file,
            storage: self.storage,
            env_prefix: self.env_prefix,
            env_source: self.env_source,
            preset: self.preset,
        }
    }
}
