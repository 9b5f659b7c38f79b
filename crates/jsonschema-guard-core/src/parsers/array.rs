//! `type: "array"`: homogeneous arrays, tuples, and the array-shaped
//! `anyOf` normalization.

use serde_json::{json, Map, Value};

use super::parse_schema;
use crate::error::SchemaError;
use crate::extend::{as_count, extend};
use crate::refs::Refs;
use crate::validator::{ArrayRule, ArrayValidator, Check, Validator, ValidatorKind};

/// Keys an `anyOf` alternative may carry and still take part in the
/// array normalization.
const MERGEABLE_KEYS: &[&str] = &["type", "items", "description", "title", "default", "examples"];

/// Outer-node keys copied onto the synthesized schema.
const CARRIED_KEYS: &[&str] = &["default", "description", "examples", "title"];

pub(crate) fn parse_array(
    node: &Map<String, Value>,
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    if let Some(Value::Array(positions)) = node.get("items") {
        return parse_tuple(positions, "items", refs);
    }
    if let Some(prefix) = node.get("prefixItems") {
        let positions = prefix
            .as_array()
            .ok_or_else(|| SchemaError::malformed(&refs.path, "`prefixItems` must be an array"))?;
        return parse_tuple(positions, "prefixItems", refs);
    }

    let element = match node.get("items") {
        Some(items) => parse_schema(items, &refs.descend(&["items"])?)?,
        None => Validator::any(),
    };
    let mut v = ArrayValidator {
        element: Box::new(element),
        checks: Vec::new(),
    };

    let path = refs.path.as_str();
    v = extend(v, node, "minItems", path, |mut v, value, message| {
        v.checks
            .push(Check::new(ArrayRule::MinItems(as_count(value)?), message));
        Ok(v)
    })?;
    v = extend(v, node, "maxItems", path, |mut v, value, message| {
        v.checks
            .push(Check::new(ArrayRule::MaxItems(as_count(value)?), message));
        Ok(v)
    })?;
    v = extend(v, node, "uniqueItems", path, |mut v, value, message| {
        match value {
            Value::Bool(true) => v.checks.push(Check::new(ArrayRule::UniqueItems, message)),
            Value::Bool(false) => {}
            other => {
                return Err(SchemaError::malformed(
                    path,
                    format!("expected a boolean, found {other}"),
                ))
            }
        }
        Ok(v)
    })?;

    Ok(Validator::new(ValidatorKind::Array(v)))
}

/// Fixed-length tuple; `minItems`/`maxItems` are implied by the arity.
fn parse_tuple(
    positions: &[Value],
    keyword: &str,
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    let validators = positions
        .iter()
        .enumerate()
        .map(|(i, position)| parse_schema(position, &refs.descend(&[keyword, &i.to_string()])?))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Validator::new(ValidatorKind::Tuple(validators)))
}

/// Merge an `anyOf` whose alternatives only differ by `type` into one
/// multi-type schema, when at least one alternative is an array.
///
/// Returns `None` when any alternative carries other keywords. When
/// alternatives disagree on `items`, the first one seen is kept.
pub(crate) fn synthesize_array_union(
    node: &Map<String, Value>,
    alternatives: &[Value],
) -> Option<Value> {
    let mut types: Vec<&str> = Vec::new();
    let mut items: Option<&Value> = None;
    let mut conflicting_items = false;

    for alternative in alternatives {
        let alternative = alternative.as_object()?;
        if alternative
            .keys()
            .any(|k| !MERGEABLE_KEYS.contains(&k.as_str()))
        {
            return None;
        }

        let names: Vec<&str> = match alternative.get("type")? {
            Value::String(name) => vec![name.as_str()],
            Value::Array(names) => names.iter().map(Value::as_str).collect::<Option<_>>()?,
            _ => return None,
        };
        for name in names {
            if !types.contains(&name) {
                types.push(name);
            }
        }

        if let Some(alt_items) = alternative.get("items") {
            match items {
                None => items = Some(alt_items),
                Some(first) if first != alt_items => conflicting_items = true,
                Some(_) => {}
            }
        }
    }

    if !types.contains(&"array") {
        return None;
    }
    if conflicting_items {
        tracing::warn!("anyOf alternatives declare different `items`; keeping the first");
    }

    let mut synthesized = Map::new();
    let type_value = match types.as_slice() {
        [single] => json!(single),
        _ => json!(types),
    };
    synthesized.insert("type".to_string(), type_value);
    if let Some(items) = items {
        synthesized.insert("items".to_string(), items.clone());
    }
    for key in CARRIED_KEYS {
        if let Some(value) = node.get(*key) {
            synthesized.insert((*key).to_string(), value.clone());
        }
    }
    Some(Value::Object(synthesized))
}
