//! `type: [..]` with two or more entries.
//!
//! `"null"` becomes nullability on the rest. Each remaining type is compiled
//! from a copy of the node narrowed to that single type, so type-specific
//! keywords (`minLength`, `items`, ...) apply to the right branch.

use serde_json::{json, Map, Value};

use super::{parse_schema, MODIFIER_KEYWORDS};
use crate::error::SchemaError;
use crate::refs::Refs;
use crate::validator::{Validator, ValidatorKind};

pub(crate) fn parse_multi_type(
    node: &Map<String, Value>,
    types: &[&str],
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    let mut names: Vec<&str> = Vec::new();
    for name in types {
        if *name != "null" && !names.contains(name) {
            names.push(*name);
        }
    }
    let nullable = types.contains(&"null");

    let mut branches = Vec::with_capacity(names.len());
    for name in &names {
        let mut narrowed = node.clone();
        for key in MODIFIER_KEYWORDS {
            narrowed.remove(*key);
        }
        narrowed.insert("type".to_string(), json!(name));
        branches.push(parse_schema(&Value::Object(narrowed), refs)?);
    }

    let validator = match branches.len() {
        0 => return Ok(Validator::new(ValidatorKind::Null)),
        1 => branches.remove(0),
        _ => Validator::new(ValidatorKind::Union(branches)),
    };
    Ok(if nullable {
        validator.nullable()
    } else {
        validator
    })
}
