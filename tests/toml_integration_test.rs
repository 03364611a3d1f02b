//! TOML Storage Integration Tests
//!
//! Tests for loading and exporting options with the TOML backend.

#![cfg(feature = "toml")]

mod common;

use common::OptionsFixture;
use lintconf::{ConfigLoader, Error, LoaderConfig, TomlStorage};
use serde_json::json;

fn toml_loader(fixture: &OptionsFixture) -> ConfigLoader<'static, TomlStorage> {
    ConfigLoader::new(
        LoaderConfig::builder()
            .config_file(&fixture.path)
            .with_storage::<TomlStorage>()
            .build(),
    )
}

#[test]
fn test_default_file_name_uses_extension() {
    let config = LoaderConfig::builder().with_storage::<TomlStorage>().build();
    assert!(config.config_file.ends_with("lintconf.toml"));
}

#[test]
fn test_toml_load() {
    let fixture = OptionsFixture::with_content(
        "lintconf.toml",
        r#"
quoteStyle = "double"
enableFormatters = true
blockOrder = ["script", "template", "style"]
"#,
    );

    let resolution = toml_loader(&fixture).load().unwrap();

    assert_eq!(resolution.config["quoteStyle"], json!("double"));
    assert_eq!(resolution.config["enableFormatters"], json!(true));
    assert_eq!(
        resolution.config["blockOrder"],
        json!(["script", "template", "style"])
    );
}

#[test]
fn test_toml_invalid_values_reported() {
    let fixture = OptionsFixture::with_content(
        "lintconf.toml",
        "quoteStyle = \"triple\"\nindentWidth = 2\n",
    );

    let err = toml_loader(&fixture).load().unwrap_err();
    assert_eq!(err.report().map(|r| r.len()), Some(2));
}

#[test]
fn test_toml_syntax_error() {
    let fixture = OptionsFixture::with_content("lintconf.toml", "quoteStyle = \n");
    assert!(matches!(toml_loader(&fixture).load(), Err(Error::Parse(_))));
}

#[test]
fn test_toml_export() {
    let fixture = OptionsFixture::with_content("lintconf.toml", "strictnessLevel = \"relaxed\"\n");
    let loader = toml_loader(&fixture);
    let resolution = loader.load().unwrap();

    let out = fixture.export_path("resolved.toml");
    loader.export(&resolution, &out).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("strictnessLevel = \"relaxed\""));
    assert!(content.contains("quoteStyle = \"single\""));
}

#[test]
fn test_blank_toml_file_means_defaults() {
    let fixture = OptionsFixture::with_content("lintconf.toml", "\n   \n");

    let resolution = toml_loader(&fixture).load().unwrap();
    assert_eq!(resolution.config, lintconf::OptionSchema::builtin().defaults());
    assert!(resolution.overrides.is_empty());
}
