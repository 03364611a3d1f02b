//! File formats for options files and exports
//!
//! A backend turns text into a `serde_json::Value` tree and back. The loader
//! uses it to parse the user's options file; [`ConfigLoader::export`] and
//! [`ConfigLoader::export_engine_options`] use it to write a resolved config
//! or the engine option object.
//!
//! JSON is always available, TOML needs the `toml` feature and YAML the
//! `yaml` feature.
//!
//! Writes never leave a half-written file behind. The content is first written
//! to a sibling `<name>.tmp` staging file, which is then renamed over the
//! target. If serialization fails nothing touches the disk.
//!
//! [`ConfigLoader::export`]: crate::ConfigLoader::export
//! [`ConfigLoader::export_engine_options`]: crate::ConfigLoader::export_engine_options

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};

/// A text format options can be stored in
pub trait StorageBackend: Clone + Send + Sync {
    /// Extension used for the default options file name (`lintconf.<ext>`)
    fn extension(&self) -> &str;

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Parse text; syntax errors are [`Error::Parse`] since the text is user input
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        self.deserialize(&content)
    }

    /// Serialize `data` and replace `path` with it through a `.tmp` staging file
    ///
    /// Missing parent directories are created.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;
        let staging = staging_path(path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        std::fs::write(&staging, &content).map_err(|e| Error::FileWrite {
            path: staging.display().to_string(),
            source: e,
        })?;

        std::fs::rename(&staging, path).map_err(|e| Error::FileWrite {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// `dir/name.ext` -> `dir/name.ext.tmp`
fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        Error::Config(format!(
            "Cannot write options to '{}': path has no file name",
            path.display()
        ))
    })?;
    let mut staged = file_name.to_os_string();
    staged.push(".tmp");
    Ok(path.with_file_name(staged))
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend (default)
#[derive(Clone, Debug)]
pub struct JsonStorage {
    pretty: bool,
}

impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// TOML Storage Implementation
// =============================================================================

/// TOML storage backend
#[cfg(feature = "toml")]
#[derive(Clone, Debug, Default)]
pub struct TomlStorage;

#[cfg(feature = "toml")]
impl TomlStorage {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "toml")]
impl StorageBackend for TomlStorage {
    fn extension(&self) -> &str {
        "toml"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        toml::to_string_pretty(data).map_err(|e| Error::Parse(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// YAML Storage Implementation
// =============================================================================

/// YAML storage backend
#[cfg(feature = "yaml")]
#[derive(Clone, Debug, Default)]
pub struct YamlStorage;

#[cfg(feature = "yaml")]
impl YamlStorage {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "yaml")]
impl StorageBackend for YamlStorage {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        serde_yaml::to_string(data).map_err(|e| Error::Parse(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
