//! Constraint extension: attach keyword refinements to a base validator.
//!
//! Every variant parser funnels its constraint keywords through [`extend`],
//! so custom-message lookup and ill-typed-value handling are identical for
//! strings, numbers, arrays and objects.

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// If `node[key]` is present, call `apply(base, value, message)`; otherwise
/// return `base` unchanged.
///
/// `message` is the custom error message for this constraint, taken from the
/// sibling `<key>Message` field, then from `errorMessage.<key>`.
pub(crate) fn extend<T, F>(
    base: T,
    node: &Map<String, Value>,
    key: &str,
    path: &str,
    apply: F,
) -> Result<T, SchemaError>
where
    F: FnOnce(T, &Value, Option<String>) -> Result<T, SchemaError>,
{
    match node.get(key) {
        Some(value) => apply(base, value, custom_message(node, key)).map_err(|err| match err {
            SchemaError::MalformedNode { message, .. } => SchemaError::MalformedNode {
                path: path.to_string(),
                message: format!("`{key}`: {message}"),
            },
            other => other,
        }),
        None => Ok(base),
    }
}

/// Custom message for `key`, if the schema declares one.
pub(crate) fn custom_message(node: &Map<String, Value>, key: &str) -> Option<String> {
    let sibling = format!("{key}Message");
    node.get(&sibling)
        .and_then(Value::as_str)
        .or_else(|| {
            node.get("errorMessage")
                .and_then(|m| m.get(key))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Constraint value readers
// ---------------------------------------------------------------------------

pub(crate) fn as_count(value: &Value) -> Result<usize, SchemaError> {
    match value.as_u64() {
        Some(n) => usize::try_from(n).map_err(|_| SchemaError::malformed("", "value is too large")),
        None => match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as usize),
            _ => Err(SchemaError::malformed(
                "",
                format!("expected a non-negative integer, found {value}"),
            )),
        },
    }
}

pub(crate) fn as_number(value: &Value) -> Result<f64, SchemaError> {
    value
        .as_f64()
        .ok_or_else(|| SchemaError::malformed("", format!("expected a number, found {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_absent_key_returns_base() {
        let node = obj(json!({ "type": "string" }));
        let result = extend(7usize, &node, "minLength", "#", |_, _, _| {
            panic!("apply must not run")
        });
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_message_lookup_order() {
        let node = obj(json!({
            "minLength": 2,
            "minLengthMessage": "sibling",
            "errorMessage": { "minLength": "ajv", "maxLength": "ajv max" }
        }));
        assert_eq!(custom_message(&node, "minLength").as_deref(), Some("sibling"));
        assert_eq!(custom_message(&node, "maxLength").as_deref(), Some("ajv max"));
        assert_eq!(custom_message(&node, "pattern"), None);
    }

    #[test]
    fn test_apply_receives_value_and_message() {
        let node = obj(json!({ "maxItems": 3, "maxItemsMessage": "too many" }));
        let result = extend(Vec::new(), &node, "maxItems", "#", |mut acc, value, message| {
            acc.push((as_count(value)?, message));
            Ok(acc)
        })
        .unwrap();
        assert_eq!(result, vec![(3, Some("too many".to_string()))]);
    }

    #[test]
    fn test_ill_typed_value_reports_path_and_key() {
        let node = obj(json!({ "minLength": "3" }));
        let err = extend((), &node, "minLength", "#/properties/a", |base, value, _| {
            as_count(value)?;
            Ok(base)
        })
        .unwrap_err();
        match err {
            SchemaError::MalformedNode { path, message } => {
                assert_eq!(path, "#/properties/a");
                assert!(message.starts_with("`minLength`"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_as_count() {
        assert_eq!(as_count(&json!(3)), Ok(3));
        assert_eq!(as_count(&json!(3.0)), Ok(3));
        assert!(as_count(&json!(-1)).is_err());
        assert!(as_count(&json!(1.5)).is_err());
    }
}
