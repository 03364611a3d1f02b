//! Common test utilities for lintconf integration tests
//!
//! Provides an options file fixture, an injectable environment and helpers
//! for building raw options.

#![allow(dead_code)]

use lintconf::{ConfigLoader, JsonStorage, LoaderConfig, RawOptions, StorageBackend};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Install a test logger once; repeated calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Turn a `json!({...})` literal into raw options
pub fn raw(value: Value) -> RawOptions {
    value
        .as_object()
        .cloned()
        .expect("raw options must be a JSON object")
}

/// Temporary directory holding one options file
pub struct OptionsFixture {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    pub env: HashMap<String, String>,
}

impl OptionsFixture {
    /// Fixture whose options file does not exist yet
    pub fn new(file_name: &str) -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(file_name);
        Self {
            temp_dir,
            path,
            env: HashMap::new(),
        }
    }

    /// Fixture with a JSON options file containing `value`
    pub fn with_json(value: Value) -> Self {
        let fixture = Self::new("lintconf.json");
        JsonStorage::new()
            .write(&fixture.path, &value)
            .expect("Failed to write options file");
        fixture
    }

    /// Fixture with an options file containing `content` verbatim
    pub fn with_content(file_name: &str, content: &str) -> Self {
        let fixture = Self::new(file_name);
        std::fs::write(&fixture.path, content).expect("Failed to write options file");
        fixture
    }

    /// Set a variable for loaders built with [`OptionsFixture::loader`]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// JSON loader reading this fixture's file and env with prefix `LINTCONF`
    pub fn loader(&self) -> ConfigLoader<'static> {
        ConfigLoader::new(
            LoaderConfig::builder()
                .config_file(&self.path)
                .with_env_prefix("LINTCONF")
                .with_env_source(self.env.clone())
                .build(),
        )
    }

    pub fn export_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}
