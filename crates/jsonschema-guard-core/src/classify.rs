//! Schema classification.
//!
//! A node may carry keywords from several shapes at once (`type`, `enum`,
//! `anyOf`, `$ref`, ...). [`classify`] resolves that overlap into exactly one
//! [`SchemaKind`] with a fixed tie-break order, so the dispatcher can match
//! exhaustively.

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// The single grammar variant a schema node is compiled as.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SchemaKind<'a> {
    AnyOf(&'a [Value]),
    OneOf(&'a [Value]),
    AllOf(&'a [Value]),
    Ref(&'a str),
    Enum(&'a [Value]),
    Const(&'a Value),
    /// `type` is an array of two or more type names.
    MultiType(Vec<&'a str>),
    Primitive(PrimitiveType),
    /// No discriminator, or the `true` schema.
    Any,
    /// The `false` schema.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrimitiveType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl PrimitiveType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(PrimitiveType::Object),
            "array" => Some(PrimitiveType::Array),
            "string" => Some(PrimitiveType::String),
            "number" => Some(PrimitiveType::Number),
            "integer" => Some(PrimitiveType::Integer),
            "boolean" => Some(PrimitiveType::Boolean),
            "null" => Some(PrimitiveType::Null),
            _ => None,
        }
    }
}

/// Classify `node`. First match wins:
///
/// 1. `anyOf` 2. `oneOf` 3. `allOf` 4. `$ref` 5. `enum` without `type`
/// 6. `const` 7. multi-type `type` 8. single `type` 9. implicit object/array
/// 10. anything else accepts every value.
pub(crate) fn classify<'a>(node: &'a Value, path: &str) -> Result<SchemaKind<'a>, SchemaError> {
    let obj = match node {
        Value::Bool(true) => return Ok(SchemaKind::Any),
        Value::Bool(false) => return Ok(SchemaKind::Never),
        Value::Object(obj) => obj,
        other => {
            return Err(SchemaError::malformed(
                path,
                format!("expected a schema object or boolean, found {other}"),
            ))
        }
    };

    if let Some(alternatives) = obj.get("anyOf") {
        return Ok(SchemaKind::AnyOf(non_empty_array(alternatives, "anyOf", path)?));
    }
    if let Some(alternatives) = obj.get("oneOf") {
        return Ok(SchemaKind::OneOf(non_empty_array(alternatives, "oneOf", path)?));
    }
    if let Some(branches) = obj.get("allOf") {
        return Ok(SchemaKind::AllOf(non_empty_array(branches, "allOf", path)?));
    }

    if let Some(reference) = obj.get("$ref") {
        let pointer = reference
            .as_str()
            .ok_or_else(|| SchemaError::malformed(path, "`$ref` must be a string"))?;
        return Ok(SchemaKind::Ref(pointer));
    }

    if !obj.contains_key("type") {
        if let Some(values) = obj.get("enum") {
            let values = values
                .as_array()
                .ok_or_else(|| SchemaError::malformed(path, "`enum` must be an array"))?;
            return Ok(SchemaKind::Enum(values));
        }
    }

    if let Some(value) = obj.get("const") {
        return Ok(SchemaKind::Const(value));
    }

    if let Some(type_value) = obj.get("type") {
        return classify_type(type_value, path);
    }

    Ok(implicit_kind(obj))
}

fn classify_type<'a>(type_value: &'a Value, path: &str) -> Result<SchemaKind<'a>, SchemaError> {
    match type_value {
        Value::String(name) => primitive(name, path).map(SchemaKind::Primitive),
        Value::Array(names) => {
            let names = names
                .iter()
                .map(|n| {
                    n.as_str().ok_or_else(|| {
                        SchemaError::malformed(path, "`type` array entries must be strings")
                    })
                })
                .collect::<Result<Vec<&str>, _>>()?;
            for name in &names {
                primitive(name, path)?;
            }
            match names.as_slice() {
                [] => Err(SchemaError::malformed(path, "`type` array must not be empty")),
                [single] => primitive(single, path).map(SchemaKind::Primitive),
                _ => Ok(SchemaKind::MultiType(names)),
            }
        }
        other => Err(SchemaError::malformed(
            path,
            format!("`type` must be a string or array of strings, found {other}"),
        )),
    }
}

fn primitive(name: &str, path: &str) -> Result<PrimitiveType, SchemaError> {
    PrimitiveType::from_name(name)
        .ok_or_else(|| SchemaError::malformed(path, format!("unknown type `{name}`")))
}

/// Typeless nodes that are still unambiguously object- or array-shaped.
fn implicit_kind(obj: &Map<String, Value>) -> SchemaKind<'static> {
    if obj.contains_key("properties") {
        SchemaKind::Primitive(PrimitiveType::Object)
    } else if obj.contains_key("items") || obj.contains_key("prefixItems") {
        SchemaKind::Primitive(PrimitiveType::Array)
    } else {
        SchemaKind::Any
    }
}

fn non_empty_array<'a>(
    value: &'a Value,
    keyword: &str,
    path: &str,
) -> Result<&'a [Value], SchemaError> {
    match value.as_array() {
        Some(items) if !items.is_empty() => Ok(items.as_slice()),
        Some(_) => Err(SchemaError::malformed(
            path,
            format!("`{keyword}` must not be empty"),
        )),
        None => Err(SchemaError::malformed(
            path,
            format!("`{keyword}` must be an array"),
        )),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
