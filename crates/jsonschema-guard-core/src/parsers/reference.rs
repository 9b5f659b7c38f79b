//! `$ref` resolution.
//!
//! Only local fragment pointers (`#/...`) are supported. They resolve against
//! the original root document first, then against the supplied definitions
//! map for `#/$defs/Name` and `#/definitions/Name`.

use serde_json::{Map, Value};

use super::parse_schema;
use crate::error::SchemaError;
use crate::refs::Refs;
use crate::schema_utils::{resolve_pointer, split_path};
use crate::validator::Validator;

pub(crate) fn parse_ref(
    node: &Map<String, Value>,
    pointer: &str,
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    if node.len() > 1 {
        let ignored: Vec<&str> = node
            .keys()
            .map(String::as_str)
            .filter(|k| *k != "$ref")
            .collect();
        tracing::debug!(path = %refs.path, ?ignored, "ignoring keywords next to $ref");
    }

    if !pointer.starts_with('#') {
        let feature = match url::Url::parse(pointer) {
            Ok(url) => format!("remote $ref `{url}`"),
            Err(_) => format!("relative $ref `{pointer}`"),
        };
        return Err(SchemaError::UnsupportedFeature {
            path: refs.path.clone(),
            feature,
        });
    }
    if pointer != "#" && !pointer.starts_with("#/") {
        return Err(SchemaError::UnsupportedFeature {
            path: refs.path.clone(),
            feature: format!("anchor $ref `{pointer}`"),
        });
    }

    let inner = refs.enter_ref(pointer)?;
    let target = resolve_target(pointer, refs).ok_or_else(|| SchemaError::UnresolvableRef {
        path: refs.path.clone(),
        reference: pointer.to_string(),
    })?;
    tracing::trace!(from = %refs.path, to = pointer, "resolved $ref");
    parse_schema(target, &inner)
}

fn resolve_target<'a>(pointer: &str, refs: &Refs<'a>) -> Option<&'a Value> {
    resolve_pointer(refs.root(), pointer).or_else(|| {
        let definitions = refs.definitions()?;
        match split_path(pointer).as_slice() {
            [keyword, name] if keyword == "$defs" || keyword == "definitions" => {
                definitions.get(name)
            }
            _ => None,
        }
    })
}
