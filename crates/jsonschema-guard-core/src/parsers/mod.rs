//! The dispatcher and per-variant parsers.
//!
//! [`parse_schema`] is the single recursive entry point: it classifies a
//! node, hands it to the matching variant parser, then layers the modifiers
//! every variant shares (nullability, enum membership, `not`, default,
//! description, title).

mod array;
mod literal;
mod multi_type;
mod number;
mod object;
mod reference;
mod string;
mod union;

use serde_json::{Map, Value};

use crate::classify::{classify, PrimitiveType, SchemaKind};
use crate::error::SchemaError;
use crate::refs::Refs;
use crate::validator::{Validator, ValidatorKind};

/// Keywords outside the supported subset. They are ignored, not rejected.
const IGNORED_KEYWORDS: &[&str] = &[
    "patternProperties",
    "if",
    "then",
    "else",
    "dependentSchemas",
    "unevaluatedProperties",
    "unevaluatedItems",
    "contentEncoding",
    "contentMediaType",
];

/// Keys applied by [`apply_modifiers`] and [`apply_metadata`] rather than by
/// a variant parser.
pub(crate) const MODIFIER_KEYWORDS: &[&str] =
    &["nullable", "enum", "not", "default", "description", "title"];

/// Compile `node` at the location described by `refs`.
pub(crate) fn parse_schema(node: &Value, refs: &Refs<'_>) -> Result<Validator, SchemaError> {
    let kind = classify(node, &refs.path)?;

    let obj = match node {
        Value::Object(obj) => obj,
        _ => {
            return Ok(match kind {
                SchemaKind::Never => Validator::new(ValidatorKind::Never),
                _ => Validator::any(),
            })
        }
    };

    let is_enum = matches!(kind, SchemaKind::Enum(_));
    let mut metadata_applied = false;
    let validator = match kind {
        SchemaKind::AnyOf(alternatives) => {
            if let Some(synthesized) = array::synthesize_array_union(obj, alternatives) {
                tracing::debug!(path = %refs.path, "normalized anyOf of array alternatives");
                // The synthesized node already carries the outer metadata.
                metadata_applied = true;
                parse_schema(&synthesized, refs)?
            } else {
                union::parse_any_of(alternatives, refs)?
            }
        }
        SchemaKind::OneOf(alternatives) => union::parse_one_of(alternatives, refs)?,
        SchemaKind::AllOf(branches) => union::parse_all_of(branches, refs)?,
        // Siblings of `$ref` are ignored, modifiers included.
        SchemaKind::Ref(pointer) => return reference::parse_ref(obj, pointer, refs),
        SchemaKind::Enum(values) => literal::parse_enum(values),
        SchemaKind::Const(value) => literal::parse_const(value),
        SchemaKind::MultiType(types) => multi_type::parse_multi_type(obj, &types, refs)?,
        SchemaKind::Primitive(primitive) => match primitive {
            PrimitiveType::Object => object::parse_object(obj, refs)?,
            PrimitiveType::Array => array::parse_array(obj, refs)?,
            PrimitiveType::String => string::parse_string(obj, refs)?,
            PrimitiveType::Number => number::parse_number(obj, false, refs)?,
            PrimitiveType::Integer => number::parse_number(obj, true, refs)?,
            PrimitiveType::Boolean => Validator::new(ValidatorKind::Boolean),
            PrimitiveType::Null => Validator::new(ValidatorKind::Null),
        },
        SchemaKind::Any => Validator::any(),
        SchemaKind::Never => Validator::new(ValidatorKind::Never),
    };

    let validator = apply_modifiers(validator, obj, is_enum, refs)?;
    Ok(if metadata_applied {
        validator
    } else {
        apply_metadata(validator, obj)
    })
}

fn apply_modifiers(
    mut validator: Validator,
    obj: &Map<String, Value>,
    is_enum: bool,
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    for keyword in IGNORED_KEYWORDS {
        if obj.contains_key(*keyword) {
            tracing::debug!(path = %refs.path, keyword, "ignoring unsupported keyword");
        }
    }

    match obj.get("nullable") {
        Some(Value::Bool(true)) => validator = validator.nullable(),
        Some(Value::Bool(false)) | None => {}
        Some(other) => {
            return Err(SchemaError::malformed(
                &refs.path,
                format!("`nullable` must be a boolean, found {other}"),
            ))
        }
    }

    if !is_enum {
        validator = literal::refine_enum(validator, obj, &refs.path)?;
    }

    if let Some(excluded) = obj.get("not") {
        let excluded = parse_schema(excluded, &refs.descend(&["not"])?)?;
        validator.modifiers.not = Some(Box::new(excluded));
    }

    Ok(validator)
}

fn apply_metadata(mut validator: Validator, obj: &Map<String, Value>) -> Validator {
    if let Some(default) = obj.get("default") {
        validator = validator.with_default(default.clone());
    }
    if let Some(description) = obj.get("description").and_then(Value::as_str) {
        validator = validator.describe(description);
    }
    if let Some(title) = obj.get("title").and_then(Value::as_str) {
        validator = validator.titled(title);
    }
    validator
}

// ===========================================================================
// Tests
// ===========================================================================
