//! Negative tests for malformed JSON Schemas.
//!
//! `compile()` must never panic on structurally valid JSON that is not a
//! valid schema. Keyword values of the wrong type are reported as
//! `MalformedNode` errors carrying the path of the offending node.

use jsonschema_guard_core::{compile, CompileOptions, ErrorCode};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn error_code(schema: &Value) -> Option<ErrorCode> {
    compile(schema, &CompileOptions::default())
        .err()
        .map(|e| e.error_code())
}

// ===========================================================================
// 1. Deterministic negative tests
// ===========================================================================

#[test]
fn malformed_top_level_values() {
    for schema in [json!(null), json!([1, 2, 3]), json!("just_a_string"), json!(42)] {
        assert_eq!(error_code(&schema), Some(ErrorCode::MalformedNode), "{schema}");
    }
}

#[test]
fn malformed_required_as_string() {
    let schema = json!({
        "type": "object",
        "properties": { "name": { "type": "string" } },
        "required": "not_an_array"
    });
    assert_eq!(error_code(&schema), Some(ErrorCode::MalformedNode));
}

#[test]
fn malformed_combinators() {
    for schema in [
        json!({ "anyOf": { "not": "an_array" } }),
        json!({ "oneOf": "not_an_array" }),
        json!({ "allOf": [] }),
    ] {
        assert_eq!(error_code(&schema), Some(ErrorCode::MalformedNode), "{schema}");
    }
}

#[test]
fn malformed_constraint_values() {
    for schema in [
        json!({ "type": "string", "maxLength": -1 }),
        json!({ "type": "number", "minimum": "0" }),
        json!({ "type": "array", "minItems": 1.5 }),
        json!({ "type": "array", "uniqueItems": "yes" }),
        json!({ "type": "object", "maxProperties": [] }),
    ] {
        assert_eq!(error_code(&schema), Some(ErrorCode::MalformedNode), "{schema}");
    }
}

#[test]
fn invalid_regex_pattern() {
    let schema = json!({ "type": "string", "pattern": "[invalid" });
    assert_eq!(error_code(&schema), Some(ErrorCode::InvalidPattern));
}

#[test]
fn malformed_deeply_nested() {
    let schema = json!({
        "type": "object",
        "properties": {
            "level1": {
                "type": "object",
                "properties": {
                    "level2": {
                        "properties": {
                            "level3": { "type": "object", "required": 42 }
                        }
                    }
                }
            }
        }
    });
    let err = compile(&schema, &CompileOptions::default()).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::MalformedNode);
    assert_eq!(
        err.path(),
        "#/properties/level1/properties/level2/properties/level3"
    );
}

#[test]
fn edge_case_boolean_schemas() {
    assert_eq!(error_code(&json!(true)), None);
    assert_eq!(error_code(&json!(false)), None);
}

// ===========================================================================
// 2. Property-based negative tests
// ===========================================================================

/// A schema keyword paired with a value of the wrong type.
fn arb_malformed_keyword() -> impl Strategy<Value = (&'static str, Value)> {
    prop_oneof![
        Just(("required", json!("not_an_array"))),
        Just(("required", json!(42))),
        Just(("required", json!({ "key": "value" }))),
        Just(("properties", json!("not_an_object"))),
        Just(("properties", json!(["a", "b"]))),
        Just(("type", json!(42))),
        Just(("type", json!([1, 2, 3]))),
        Just(("type", json!(null))),
        Just(("type", json!("text"))),
        Just(("allOf", json!({ "type": "string" }))),
        Just(("anyOf", json!("bad"))),
        Just(("oneOf", json!(true))),
        Just(("items", json!(99))),
        Just(("items", json!("bad"))),
        Just(("enum", json!("bad"))),
        Just(("$ref", json!(42))),
        Just(("$ref", json!(["a", "b"]))),
        Just(("additionalProperties", json!([1, 2]))),
        Just(("additionalProperties", json!("bad"))),
        Just(("minLength", json!("3"))),
        Just(("pattern", json!("("))),
        Just(("nullable", json!("yes"))),
    ]
}

/// A schema with 1-3 wrong keywords on top of a plausible base.
fn arb_malformed_schema() -> impl Strategy<Value = Value> {
    let base = prop_oneof![
        Just(json!({})),
        Just(json!({ "type": "object" })),
        Just(json!({ "type": "string" })),
        Just(json!({ "type": "array" })),
    ];
    (base, proptest::collection::vec(arb_malformed_keyword(), 1..=3)).prop_map(
        |(base, keywords)| {
            let mut obj: Map<String, Value> = base.as_object().cloned().unwrap_or_default();
            for (key, value) in keywords {
                obj.insert(key.to_string(), value);
            }
            Value::Object(obj)
        },
    )
}

/// Arbitrary JSON up to a small depth.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z$#/]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map(
                prop_oneof![
                    Just("type".to_string()),
                    Just("properties".to_string()),
                    Just("items".to_string()),
                    Just("anyOf".to_string()),
                    Just("$ref".to_string()),
                    Just("enum".to_string()),
                    "[a-z]{1,6}",
                ],
                inner,
                0..4
            )
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..Default::default() })]

    /// Malformed schemas never panic.
    #[test]
    fn malformed_schema_never_panics(schema in arb_malformed_schema()) {
        let _ = compile(&schema, &CompileOptions::default());
        let _ = compile(&schema, &CompileOptions::strict());
    }

    /// Arbitrary JSON never panics, and every error carries a JSON Pointer.
    #[test]
    fn arbitrary_json_never_panics(schema in arb_json()) {
        if let Err(err) = compile(&schema, &CompileOptions::default()) {
            prop_assert!(err.path().starts_with('#'), "path {} for {}", err.path(), schema);
        }
    }

    /// A compiled validator never panics on arbitrary instances.
    #[test]
    fn validation_never_panics(schema in arb_json(), instance in arb_json()) {
        if let Ok(validator) = compile(&schema, &CompileOptions::default()) {
            let _ = validator.parse(&instance);
            let _ = validator.to_json_schema();
        }
    }
}
