//! Resolution Workflow Integration Tests
//!
//! Tests for the validate-then-resolve lifecycle through the public API:
//! - Defaults and the override law
//! - Idempotence of resolution
//! - Exhaustive, ordered validation errors
//! - Override diagnostics
//! - Custom schemas and presets

mod common;

use common::raw;
use lintconf::{
    Error, OptionSchema, OptionSpec, OverrideSource, PathSegment, Preset, Resolver,
    ValidationErrorKind, Validator, choice, options,
};
use serde_json::{Value, json};

// =============================================================================
// Defaults and Overrides
// =============================================================================

#[test]
fn test_empty_options_resolve_to_defaults() {
    let schema = OptionSchema::builtin();
    let resolution = lintconf::resolve(&raw(json!({}))).unwrap();

    for (key, spec) in schema.iter() {
        assert_eq!(resolution.config[key], spec.default, "default for {key}");
        assert_eq!(
            &resolution.config[key],
            &schema.describe(key).unwrap().default
        );
    }
    assert_eq!(resolution.config.len(), schema.len());
}

#[test]
fn test_override_law() {
    let inputs = [
        json!({"quoteStyle": "double"}),
        json!({"blockOrder": ["style", "script"], "strictnessLevel": "relaxed"}),
        json!({"enableFormatters": true, "blockOrder": []}),
    ];

    for input in inputs {
        let input = raw(input);
        let resolution = lintconf::resolve(&input).unwrap();

        for (key, spec) in OptionSchema::builtin().iter() {
            let expected = input.get(key).unwrap_or(&spec.default);
            assert_eq!(&resolution.config[key], expected, "{key}");
        }
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let input = raw(json!({"quoteStyle": "double", "blockOrder": ["script", "template"]}));
    let first = lintconf::resolve(&input).unwrap();
    let second = lintconf::resolve(&first.config.to_raw()).unwrap();

    assert_eq!(first.config, second.config);
}

#[test]
fn test_resolution_is_deterministic() {
    let input = raw(json!({"enableFormatters": true, "strictnessLevel": "relaxed"}));
    assert_eq!(
        lintconf::resolve(&input).unwrap(),
        lintconf::resolve(&input).unwrap()
    );
}

#[test]
fn test_end_to_end_example() {
    let resolution =
        lintconf::resolve(&raw(json!({"quoteStyle": "double", "enableFormatters": true})))
            .unwrap();

    assert_eq!(
        serde_json::to_value(&resolution.config).unwrap(),
        json!({
            "blockOrder": ["template", "script", "style"],
            "quoteStyle": "double",
            "enableFormatters": true,
            "strictnessLevel": "strict"
        })
    );

    let diagnostics: Vec<(&str, &Value, &Value)> =
        resolution.overrides.iter().map(|o| o.as_tuple()).collect();
    assert_eq!(
        diagnostics,
        vec![
            ("quoteStyle", &json!("single"), &json!("double")),
            ("enableFormatters", &json!(false), &json!(true)),
        ]
    );
    assert!(
        resolution
            .overrides
            .iter()
            .all(|o| o.source == OverrideSource::User)
    );
}

#[test]
fn test_resolve_does_not_mutate_input() {
    let input = raw(json!({"quoteStyle": "double"}));
    let before = input.clone();
    let _ = lintconf::resolve(&input).unwrap();
    assert_eq!(input, before);
}

// =============================================================================
// Validation Errors
// =============================================================================

#[test]
fn test_unknown_key_reported_alone() {
    let report = lintconf::validate(&raw(json!({"fooBar": 1})));

    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].kind, ValidationErrorKind::UnknownOption);
    assert_eq!(
        report.errors()[0].option_path,
        vec![PathSegment::key("fooBar")]
    );
}

#[test]
fn test_wrong_type_references_option() {
    let report = lintconf::validate(&raw(json!({"quoteStyle": 123})));

    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].key(), "quoteStyle");
    assert!(matches!(
        report.errors()[0].kind,
        ValidationErrorKind::TypeMismatch { .. } | ValidationErrorKind::ValueNotAllowed { .. }
    ));
}

#[test]
fn test_multiple_errors_in_input_order() {
    let report = lintconf::validate(&raw(json!({"fooBar": 1, "quoteStyle": "triple"})));

    assert_eq!(report.len(), 2);
    assert_eq!(report.errors()[0].key(), "fooBar");
    assert_eq!(report.errors()[0].kind, ValidationErrorKind::UnknownOption);
    assert_eq!(report.errors()[1].key(), "quoteStyle");
    assert!(matches!(
        report.errors()[1].kind,
        ValidationErrorKind::ValueNotAllowed { .. }
    ));
}

#[test]
fn test_resolve_rejects_invalid_without_partial_result() {
    let err = lintconf::resolve(&raw(json!({"quoteStyle": "double", "blockOrder": ["footer"]})))
        .unwrap_err();

    let Error::Validation(report) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.errors()[0].option_path,
        vec![PathSegment::key("blockOrder"), PathSegment::Index(0)]
    );
}

#[test]
fn test_resolver_precondition_on_invalid_input() {
    let err = Resolver::builtin()
        .resolve_raw(&raw(json!({"enableFormatters": "yes"})))
        .unwrap_err();

    assert!(matches!(err, Error::Precondition(_)));
    assert!(!err.is_user_error());
}

// =============================================================================
// Custom Schemas
// =============================================================================

#[test]
fn test_custom_schema_round_trip() {
    let schema = options! {
        "indentStyle" => OptionSpec::select("space", vec![
            choice("space", "Spaces"),
            choice("tab", "Tabs"),
        ]),
        "semicolons" => OptionSpec::toggle(false),
    }
    .unwrap();

    let validator = Validator::new(&schema);
    let validated = validator
        .check(&raw(json!({"semicolons": true})))
        .unwrap();
    let resolution = Resolver::new(&schema).resolve(&validated).unwrap();

    assert_eq!(resolution.config["indentStyle"], json!("space"));
    assert_eq!(resolution.config["semicolons"], json!(true));

    // Built-in keys mean nothing to this schema
    let report = validator.validate(&raw(json!({"quoteStyle": "double"})));
    assert_eq!(report.errors()[0].kind, ValidationErrorKind::UnknownOption);
}

#[test]
fn test_validated_options_are_bound_to_their_schema() {
    let copy = OptionSchema::builtin().clone();
    let validated = Validator::new(&copy)
        .check(&raw(json!({"quoteStyle": "double"})))
        .unwrap();

    assert!(matches!(
        Resolver::builtin().resolve(&validated),
        Err(Error::Precondition(_))
    ));
    assert!(Resolver::new(&copy).resolve(&validated).is_ok());
}

// =============================================================================
// Presets
// =============================================================================

#[test]
fn test_preset_changes_are_visible() {
    let resolution = Resolver::builtin()
        .with_preset(Preset::less_opinionated())
        .unwrap()
        .resolve_raw(&raw(json!({})))
        .unwrap();

    assert_eq!(resolution.config["strictnessLevel"], json!("relaxed"));
    assert_eq!(resolution.overrides.len(), 1);
    assert_eq!(
        resolution.overrides[0].source,
        OverrideSource::Preset("lessOpinionated".to_string())
    );
}

#[test]
fn test_custom_preset_bundle() {
    let preset = Preset::new("team")
        .set("quoteStyle", "double")
        .set("blockOrder", json!(["script", "template", "style"]));

    let resolution = Resolver::builtin()
        .with_preset(preset)
        .unwrap()
        .resolve_raw(&raw(json!({"quoteStyle": "single"})))
        .unwrap();

    assert_eq!(resolution.config["quoteStyle"], json!("single"));
    assert_eq!(
        resolution.config["blockOrder"],
        json!(["script", "template", "style"])
    );
    assert_eq!(
        resolution.changelog(),
        vec![
            "quoteStyle: \"single\" -> \"double\" (preset 'team')",
            "blockOrder: [\"template\",\"script\",\"style\"] -> [\"script\",\"template\",\"style\"] (preset 'team')",
            "quoteStyle: \"double\" -> \"single\"",
        ]
    );
}
