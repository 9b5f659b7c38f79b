//! Compile JSON Schema documents into executable validators.
//!
//! ```
//! use jsonschema_guard_core::{compile, CompileOptions};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": { "type": "string" },
//!         "age": { "type": "integer", "minimum": 0 }
//!     },
//!     "required": ["name"]
//! });
//! let validator = compile(&schema, &CompileOptions::default()).unwrap();
//!
//! assert!(validator.is_valid(&json!({ "name": "Ada" })));
//! assert!(!validator.is_valid(&json!({ "age": -1 })));
//! ```
//!
//! Compilation is a single recursive descent: each node is classified into
//! one grammar variant, compiled by that variant's parser, and decorated with
//! the shared modifiers. The resulting [`Validator`] is immutable and can be
//! exported back to JSON Schema with [`Validator::to_json_schema`].

pub mod config;
pub mod error;
pub mod schema_utils;
pub mod validator;

mod classify;
mod extend;
mod parsers;
mod refs;
mod strict;

use serde_json::{Map, Value};

pub use config::CompileOptions;
pub use error::{CompileError, ErrorCode, SchemaError};
pub use schema_utils::{
    build_path, escape_pointer_segment, json_type_name, split_path, unescape_pointer_segment,
};
pub use validator::{
    IssueCode, ObjectField, StringFormat, UnknownKeys, ValidationError, ValidationIssue,
    Validator, ValidatorKind,
};

use refs::Refs;

/// Compile `schema` into a [`Validator`].
///
/// # Errors
///
/// Returns a [`CompileError`] wrapping the first [`SchemaError`] met during
/// the descent.
pub fn compile(schema: &Value, options: &CompileOptions) -> Result<Validator, CompileError> {
    compile_inner(schema, None, options)
}

/// Like [`compile`], with an external definitions map that `#/$defs/Name`
/// and `#/definitions/Name` fall back to when the root document has no such
/// entry.
pub fn compile_with_definitions(
    schema: &Value,
    definitions: &Map<String, Value>,
    options: &CompileOptions,
) -> Result<Validator, CompileError> {
    compile_inner(schema, Some(definitions), options)
}

fn compile_inner(
    schema: &Value,
    definitions: Option<&Map<String, Value>>,
    options: &CompileOptions,
) -> Result<Validator, CompileError> {
    let refs = Refs::new(schema, definitions, options);
    let pruned = if options.strict {
        strict::prune_root(schema)
    } else {
        None
    };
    let root = pruned.as_ref().unwrap_or(schema);

    tracing::debug!(strict = options.strict, max_depth = options.max_depth, "compiling schema");
    let validator = parsers::parse_schema(root, &refs).map_err(|source| {
        tracing::debug!(error = %source, "schema compilation failed");
        CompileError::from(source)
    })?;
    Ok(validator)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_strict_prunes_root_and_rejects_unknown_keys() {
        let schema = json!({
            "type": "object",
            "properties": { "name": { "type": "string" }, "age": { "type": "number" } },
            "required": ["name"]
        });
        let lenient = compile(&schema, &CompileOptions::default()).unwrap();
        let strict = compile(&schema, &CompileOptions::strict()).unwrap();

        assert!(lenient.is_valid(&json!({ "name": "a", "age": 1 })));
        assert!(strict.is_valid(&json!({ "name": "a" })));
        let err = strict.parse(&json!({ "name": "a", "age": 1 })).unwrap_err();
        assert_eq!(err.codes(), vec![IssueCode::UnrecognizedKeys]);
    }

    #[test]
    fn test_strict_closes_only_the_root_object() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "object", "properties": { "x": {} } } }
        });
        let lenient = compile(&schema, &CompileOptions::default()).unwrap();
        let strict = compile(&schema, &CompileOptions::strict()).unwrap();
        assert!(lenient.is_valid(&json!({ "b": 1 })));
        assert!(!strict.is_valid(&json!({ "b": 1 })));
        assert!(strict.is_valid(&json!({ "a": { "x": 1, "y": 2 } })));
    }

    #[test]
    fn test_errors_are_wrapped_once() {
        let err = compile(&json!({ "type": "bogus" }), &CompileOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::MalformedNode);
        assert_eq!(err.path(), "#");
        assert!(err.to_string().starts_with("Failed to compile JSON Schema: "));
    }

    #[test]
    fn test_definitions_fallback() {
        let schema = json!({
            "type": "object",
            "properties": { "tag": { "$ref": "#/definitions/Tag" } }
        });
        let definitions = json!({ "Tag": { "type": "string", "maxLength": 3 } });
        let v = compile_with_definitions(
            &schema,
            definitions.as_object().unwrap(),
            &CompileOptions::default(),
        )
        .unwrap();
        assert!(v.is_valid(&json!({ "tag": "abc" })));
        assert!(!v.is_valid(&json!({ "tag": "abcd" })));

        let err = compile(&schema, &CompileOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::UnresolvableRef);
    }

    #[test]
    fn test_depth_limit() {
        let mut schema = json!({ "type": "string" });
        for _ in 0..10 {
            schema = json!({ "type": "array", "items": schema });
        }
        let options = CompileOptions {
            max_depth: 5,
            ..CompileOptions::default()
        };
        let err = compile(&schema, &options).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::RecursionDepthExceeded);
        assert!(compile(&schema, &CompileOptions::default()).is_ok());
    }
}
