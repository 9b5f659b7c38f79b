//! Strict mode: root pruning.
//!
//! When the root is an object schema, every property not named in `required`
//! is dropped and an absent `additionalProperties` becomes `false`, so the
//! pruned keys are rejected rather than passed through. Only the root is
//! touched, and only on a copy; nested objects and `$ref` targets compile as
//! written.

use serde_json::{Map, Value};

const COMBINATORS: &[&str] = &["anyOf", "oneOf", "allOf", "$ref"];

/// Return the strict copy of `schema`, or `None` when nothing applies.
pub(crate) fn prune_root(schema: &Value) -> Option<Value> {
    let obj = schema.as_object()?;
    if !is_object_schema(obj) || COMBINATORS.iter().any(|k| obj.contains_key(*k)) {
        return None;
    }

    let mut pruned = obj.clone();
    let mut changed = false;
    if let Some(kept) = prune_optional_properties(obj) {
        pruned.insert("properties".to_string(), Value::Object(kept));
        changed = true;
    }
    if !pruned.contains_key("additionalProperties") {
        pruned.insert("additionalProperties".to_string(), Value::Bool(false));
        changed = true;
    }
    changed.then_some(Value::Object(pruned))
}

fn prune_optional_properties(obj: &Map<String, Value>) -> Option<Map<String, Value>> {
    let required: Vec<&str> = obj
        .get("required")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    if required.is_empty() {
        return None;
    }
    let properties = obj.get("properties")?.as_object()?;

    let (kept, dropped): (Vec<_>, Vec<_>) = properties
        .iter()
        .partition(|(name, _)| required.contains(&name.as_str()));
    if dropped.is_empty() {
        return None;
    }
    tracing::debug!(
        dropped = ?dropped.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
        "strict mode pruned optional root properties"
    );

    Some(
        kept.into_iter()
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect(),
    )
}

fn is_object_schema(obj: &Map<String, Value>) -> bool {
    match obj.get("type") {
        Some(Value::String(t)) => t == "object",
        Some(Value::Array(types)) => types.iter().any(|t| t == "object"),
        Some(_) => false,
        None => obj.contains_key("properties"),
    }
}
