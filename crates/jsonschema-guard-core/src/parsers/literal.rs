//! `enum` and `const`.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::validator::{Validator, ValidatorKind};

pub(crate) fn parse_enum(values: &[Value]) -> Validator {
    match values {
        [single] => Validator::new(ValidatorKind::Literal(single.clone())),
        _ => Validator::new(ValidatorKind::Enum(values.to_vec())),
    }
}

pub(crate) fn parse_const(value: &Value) -> Validator {
    Validator::new(ValidatorKind::Literal(value.clone()))
}

/// `enum` next to a discriminating keyword narrows the compiled validator to
/// the listed values. Every listed value must itself pass the validator.
pub(crate) fn refine_enum(
    mut validator: Validator,
    node: &Map<String, Value>,
    path: &str,
) -> Result<Validator, SchemaError> {
    let Some(values) = node.get("enum") else {
        return Ok(validator);
    };
    let values = values
        .as_array()
        .ok_or_else(|| SchemaError::malformed(path, "`enum` must be an array"))?;

    if let Some(conflict) = values.iter().find(|v| !validator.is_valid(v)) {
        return Err(SchemaError::malformed(
            path,
            format!("`enum` value {conflict} conflicts with the declared type"),
        ));
    }
    validator.modifiers.allowed = Some(values.clone());
    Ok(validator)
}
