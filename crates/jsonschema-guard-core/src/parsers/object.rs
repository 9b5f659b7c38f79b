//! `type: "object"`.

use serde_json::{Map, Value};

use super::parse_schema;
use crate::error::SchemaError;
use crate::extend::{as_count, extend};
use crate::refs::Refs;
use crate::validator::{
    Check, ObjectField, ObjectRule, ObjectValidator, UnknownKeys, Validator, ValidatorKind,
};

pub(crate) fn parse_object(
    node: &Map<String, Value>,
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    let required = required_keys(node, &refs.path)?;

    let mut fields = Vec::new();
    match node.get("properties") {
        None => {}
        Some(Value::Object(properties)) => {
            for (name, schema) in properties {
                let child = refs.descend(&["properties", name])?;
                fields.push(ObjectField {
                    name: name.clone(),
                    validator: parse_schema(schema, &child)?,
                    required: required.contains(&name.as_str()),
                });
            }
        }
        Some(other) => {
            return Err(SchemaError::malformed(
                &refs.path,
                format!("`properties` must be an object, found {other}"),
            ))
        }
    }

    // Required keys without a declared schema still have to be present.
    for name in &required {
        if !fields.iter().any(|f| f.name == *name) {
            fields.push(ObjectField {
                name: (*name).to_string(),
                validator: Validator::any(),
                required: true,
            });
        }
    }

    let unknown_keys = match node.get("additionalProperties") {
        Some(Value::Bool(false)) => UnknownKeys::Reject,
        Some(Value::Bool(true)) => UnknownKeys::Accept,
        Some(schema @ Value::Object(_)) => {
            let child = refs.descend(&["additionalProperties"])?;
            UnknownKeys::Validate(Box::new(parse_schema(schema, &child)?))
        }
        Some(other) => {
            return Err(SchemaError::malformed(
                &refs.path,
                format!("`additionalProperties` must be a boolean or schema, found {other}"),
            ))
        }
        None => UnknownKeys::Accept,
    };

    let mut v = ObjectValidator {
        fields,
        unknown_keys,
        checks: Vec::new(),
    };
    let path = refs.path.as_str();
    v = extend(v, node, "minProperties", path, |mut v, value, message| {
        v.checks.push(Check::new(
            ObjectRule::MinProperties(as_count(value)?),
            message,
        ));
        Ok(v)
    })?;
    v = extend(v, node, "maxProperties", path, |mut v, value, message| {
        v.checks.push(Check::new(
            ObjectRule::MaxProperties(as_count(value)?),
            message,
        ));
        Ok(v)
    })?;

    Ok(Validator::new(ValidatorKind::Object(v)))
}

fn required_keys<'a>(node: &'a Map<String, Value>, path: &str) -> Result<Vec<&'a str>, SchemaError> {
    match node.get("required") {
        None => Ok(Vec::new()),
        Some(Value::Array(names)) => names
            .iter()
            .map(|n| {
                n.as_str()
                    .ok_or_else(|| SchemaError::malformed(path, "`required` entries must be strings"))
            })
            .collect(),
        Some(other) => Err(SchemaError::malformed(
            path,
            format!("`required` must be an array, found {other}"),
        )),
    }
}
