//! Reverse export: compiled validator → JSON Schema.
//!
//! `type`, `properties`, `required`, array `items`, combinators, constraints
//! and metadata survive a compile → export cycle. The unknown-key policy of
//! objects is not exported, so boolean and schema-valued
//! `additionalProperties` do not round-trip.

use serde_json::{json, Map, Value};

use super::{ArrayRule, NumberRule, ObjectRule, StringRule, Validator, ValidatorKind};

impl Validator {
    /// Export this validator as a JSON Schema document.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = self.kind.to_json_schema();

        if self.modifiers.nullable {
            schema = make_nullable(schema);
        }

        if let Value::Object(obj) = &mut schema {
            if let Some(allowed) = &self.modifiers.allowed {
                obj.insert("enum".to_string(), Value::Array(allowed.clone()));
            }
            if let Some(not) = &self.modifiers.not {
                obj.insert("not".to_string(), not.to_json_schema());
            }
            if let Some(default) = &self.modifiers.default {
                obj.insert("default".to_string(), default.clone());
            }
            if let Some(description) = &self.modifiers.description {
                obj.insert("description".to_string(), json!(description));
            }
            if let Some(title) = &self.modifiers.title {
                obj.insert("title".to_string(), json!(title));
            }
        }
        schema
    }
}

impl ValidatorKind {
    fn to_json_schema(&self) -> Value {
        match self {
            ValidatorKind::Any => json!({}),
            ValidatorKind::Never => json!({ "not": {} }),
            ValidatorKind::String(v) => {
                let mut obj = typed("string");
                for check in &v.checks {
                    match &check.rule {
                        StringRule::MinLength(n) => obj.insert("minLength".into(), json!(n)),
                        StringRule::MaxLength(n) => obj.insert("maxLength".into(), json!(n)),
                        StringRule::Pattern(re) => obj.insert("pattern".into(), json!(re.as_str())),
                        StringRule::Format(f) => obj.insert("format".into(), json!(f.as_str())),
                    };
                }
                Value::Object(obj)
            }
            ValidatorKind::Number(v) => {
                let mut obj = typed(if v.integer { "integer" } else { "number" });
                for check in &v.checks {
                    let (key, n) = match check.rule {
                        NumberRule::Minimum(n) => ("minimum", n),
                        NumberRule::Maximum(n) => ("maximum", n),
                        NumberRule::ExclusiveMinimum(n) => ("exclusiveMinimum", n),
                        NumberRule::ExclusiveMaximum(n) => ("exclusiveMaximum", n),
                        NumberRule::MultipleOf(n) => ("multipleOf", n),
                    };
                    obj.insert(key.to_string(), number_value(n));
                }
                Value::Object(obj)
            }
            ValidatorKind::Boolean => Value::Object(typed("boolean")),
            ValidatorKind::Null => Value::Object(typed("null")),
            ValidatorKind::Literal(v) => json!({ "const": v }),
            ValidatorKind::Enum(values) => json!({ "enum": values }),
            ValidatorKind::Array(v) => {
                let mut obj = typed("array");
                obj.insert("items".to_string(), v.element.to_json_schema());
                for check in &v.checks {
                    match check.rule {
                        ArrayRule::MinItems(n) => obj.insert("minItems".into(), json!(n)),
                        ArrayRule::MaxItems(n) => obj.insert("maxItems".into(), json!(n)),
                        ArrayRule::UniqueItems => obj.insert("uniqueItems".into(), json!(true)),
                    };
                }
                Value::Object(obj)
            }
            ValidatorKind::Tuple(items) => {
                let mut obj = typed("array");
                let exported: Vec<Value> = items.iter().map(Validator::to_json_schema).collect();
                obj.insert("items".to_string(), Value::Array(exported));
                obj.insert("minItems".to_string(), json!(items.len()));
                obj.insert("maxItems".to_string(), json!(items.len()));
                Value::Object(obj)
            }
            ValidatorKind::Object(v) => {
                let mut obj = typed("object");
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in &v.fields {
                    properties.insert(field.name.clone(), field.validator.to_json_schema());
                    if field.required {
                        required.push(json!(field.name));
                    }
                }
                obj.insert("properties".to_string(), Value::Object(properties));
                if !required.is_empty() {
                    obj.insert("required".to_string(), Value::Array(required));
                }
                for check in &v.checks {
                    match check.rule {
                        ObjectRule::MinProperties(n) => obj.insert("minProperties".into(), json!(n)),
                        ObjectRule::MaxProperties(n) => obj.insert("maxProperties".into(), json!(n)),
                    };
                }
                Value::Object(obj)
            }
            ValidatorKind::Union(alternatives) => json!({ "anyOf": export_all(alternatives) }),
            ValidatorKind::ExclusiveUnion(alternatives) => {
                json!({ "oneOf": export_all(alternatives) })
            }
            ValidatorKind::Intersection(branches) => json!({ "allOf": export_all(branches) }),
        }
    }
}

fn typed(type_name: &str) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("type".to_string(), json!(type_name));
    obj
}

fn export_all(validators: &[Validator]) -> Vec<Value> {
    validators.iter().map(Validator::to_json_schema).collect()
}

/// Whole numbers export as JSON integers so `minimum: 1` stays `1`.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

/// `{type: T}` becomes `{type: [T, "null"]}`; anything else is wrapped in
/// `anyOf: [schema, {type: null}]`.
fn make_nullable(schema: Value) -> Value {
    let mut obj = match schema {
        Value::Object(obj) => obj,
        other => return other,
    };
    let type_name = obj.get("type").and_then(Value::as_str).map(str::to_string);
    match type_name.as_deref() {
        Some("null") => Value::Object(obj),
        Some(t) => {
            obj.insert("type".to_string(), json!([t, "null"]));
            Value::Object(obj)
        }
        None => json!({ "anyOf": [Value::Object(obj), { "type": "null" }] }),
    }
}
