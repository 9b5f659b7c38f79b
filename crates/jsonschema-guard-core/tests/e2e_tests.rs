//! End-to-end tests over the fixture schemas in `tests/schemas/`.
//!
//! Each fixture with a matching `tests/cases/<name>.json` file is compiled and
//! checked against its `valid` and `invalid` instances.

use jsonschema_guard_core::{compile, CompileOptions, ErrorCode};
use serde_json::Value;
use std::fs;
use std::path::Path;

// ── Helpers ─────────────────────────────────────────────────────────────────

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/schemas");
const CASES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/cases");

fn fixture_names() -> Vec<&'static str> {
    vec![
        "simple",
        "tool_call",
        "refs",
        "combinators",
        "tuple",
        "kitchen_sink",
    ]
}

fn load_json(dir: &str, name: &str) -> Value {
    let path = Path::new(dir).join(format!("{name}.json"));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

fn cases(name: &str, key: &str) -> Vec<Value> {
    load_json(CASES_DIR, name)[key]
        .as_array()
        .unwrap_or_else(|| panic!("{name} cases missing `{key}`"))
        .clone()
}

// ── Fixture cases ───────────────────────────────────────────────────────────

#[test]
fn test_fixtures_accept_valid_instances() {
    for name in fixture_names() {
        let validator = compile(&load_json(FIXTURES_DIR, name), &CompileOptions::default())
            .unwrap_or_else(|e| panic!("{name} failed to compile: {e}"));
        for instance in cases(name, "valid") {
            if let Err(err) = validator.parse(&instance) {
                panic!("{name}: expected {instance} to be valid, got {err}");
            }
        }
    }
}

#[test]
fn test_fixtures_reject_invalid_instances() {
    for name in fixture_names() {
        let validator = compile(&load_json(FIXTURES_DIR, name), &CompileOptions::default())
            .unwrap_or_else(|e| panic!("{name} failed to compile: {e}"));
        for instance in cases(name, "invalid") {
            assert!(
                !validator.is_valid(&instance),
                "{name}: expected {instance} to be rejected"
            );
        }
    }
}

#[test]
fn test_fixture_exports_are_recompilable() {
    for name in fixture_names() {
        let validator = compile(&load_json(FIXTURES_DIR, name), &CompileOptions::default())
            .unwrap_or_else(|e| panic!("{name} failed to compile: {e}"));
        let exported = validator.to_json_schema();
        let recompiled = compile(&exported, &CompileOptions::default())
            .unwrap_or_else(|e| panic!("{name} export failed to recompile: {e}"));
        for instance in cases(name, "valid") {
            assert!(
                recompiled.is_valid(&instance),
                "{name}: exported schema rejects {instance}"
            );
        }
    }
}

// ── Specific fixtures ───────────────────────────────────────────────────────

#[test]
fn test_recursive_fixture_reports_cycle() {
    let err = compile(&load_json(FIXTURES_DIR, "recursive"), &CompileOptions::default())
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::CycleDetected);
    assert_eq!(err.path(), "#/$defs/Node/properties/children/items");
}

#[test]
fn test_tool_call_fills_defaults() {
    let validator =
        compile(&load_json(FIXTURES_DIR, "tool_call"), &CompileOptions::default()).unwrap();
    let output = validator
        .parse(&serde_json::json!({ "location": "Oslo" }))
        .unwrap();
    assert_eq!(
        output,
        serde_json::json!({ "location": "Oslo", "unit": "celsius" })
    );
}

#[test]
fn test_tool_call_metadata() {
    let validator =
        compile(&load_json(FIXTURES_DIR, "tool_call"), &CompileOptions::default()).unwrap();
    assert_eq!(validator.title(), Some("get_weather"));
    assert_eq!(
        validator.description(),
        Some("Look up the forecast for a city")
    );
}

#[test]
fn test_strict_mode_on_fixture() {
    let schema = load_json(FIXTURES_DIR, "simple");
    let strict = compile(&schema, &CompileOptions::strict()).unwrap();
    assert!(strict.is_valid(&serde_json::json!({ "name": "Ada" })));
    assert!(!strict.is_valid(&serde_json::json!({ "name": "Ada", "age": 36 })));
}
