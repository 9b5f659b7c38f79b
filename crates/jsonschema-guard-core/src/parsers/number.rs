//! `type: "number"` and `type: "integer"`.
//!
//! `exclusiveMinimum`/`exclusiveMaximum` accept both the numeric form and
//! the draft-4 boolean form, which turns the matching inclusive bound
//! exclusive.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::extend::{as_number, extend};
use crate::refs::Refs;
use crate::validator::{Check, NumberRule, NumberValidator, Validator, ValidatorKind};

pub(crate) fn parse_number(
    node: &Map<String, Value>,
    integer: bool,
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    let path = refs.path.as_str();
    let mut v = NumberValidator {
        integer,
        checks: Vec::new(),
    };

    v = extend(v, node, "minimum", path, |mut v, value, message| {
        v.checks
            .push(Check::new(NumberRule::Minimum(as_number(value)?), message));
        Ok(v)
    })?;
    v = extend(v, node, "maximum", path, |mut v, value, message| {
        v.checks
            .push(Check::new(NumberRule::Maximum(as_number(value)?), message));
        Ok(v)
    })?;
    v = extend(v, node, "exclusiveMinimum", path, |v, value, message| {
        exclusive_bound(v, value, message, Bound::Lower)
    })?;
    v = extend(v, node, "exclusiveMaximum", path, |v, value, message| {
        exclusive_bound(v, value, message, Bound::Upper)
    })?;
    v = extend(v, node, "multipleOf", path, |mut v, value, message| {
        let n = as_number(value)?;
        if n <= 0.0 {
            return Err(SchemaError::malformed(path, "must be greater than 0"));
        }
        v.checks.push(Check::new(NumberRule::MultipleOf(n), message));
        Ok(v)
    })?;

    Ok(Validator::new(ValidatorKind::Number(v)))
}

#[derive(Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

fn exclusive_bound(
    mut v: NumberValidator,
    value: &Value,
    message: Option<String>,
    bound: Bound,
) -> Result<NumberValidator, SchemaError> {
    match value {
        Value::Bool(false) => {}
        Value::Bool(true) => {
            for check in &mut v.checks {
                let converted = match (bound, check.rule) {
                    (Bound::Lower, NumberRule::Minimum(n)) => NumberRule::ExclusiveMinimum(n),
                    (Bound::Upper, NumberRule::Maximum(n)) => NumberRule::ExclusiveMaximum(n),
                    _ => continue,
                };
                check.rule = converted;
                if message.is_some() {
                    check.message = message.clone();
                }
            }
        }
        other => {
            let n = as_number(other)?;
            let rule = match bound {
                Bound::Lower => NumberRule::ExclusiveMinimum(n),
                Bound::Upper => NumberRule::ExclusiveMaximum(n),
            };
            v.checks.push(Check::new(rule, message));
        }
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompileOptions;
    use crate::validator::IssueCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compile(schema: Value, integer: bool) -> Result<Validator, SchemaError> {
        let refs = Refs::new(&schema, None, &CompileOptions::default());
        parse_number(schema.as_object().unwrap(), integer, &refs)
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        let v = compile(json!({ "type": "integer" }), true).unwrap();
        assert!(v.is_valid(&json!(4)));
        assert!(v.is_valid(&json!(4.0)));
        assert!(!v.is_valid(&json!(4.5)));
    }

    #[test]
    fn test_inclusive_and_exclusive_bounds() {
        let v = compile(
            json!({ "type": "number", "minimum": 0, "exclusiveMaximum": 10 }),
            false,
        )
        .unwrap();
        assert!(v.is_valid(&json!(0)));
        assert!(v.is_valid(&json!(9.99)));
        assert!(!v.is_valid(&json!(10)));
        assert!(!v.is_valid(&json!(-0.1)));
    }

    #[test]
    fn test_draft4_boolean_exclusive() {
        let v = compile(
            json!({ "type": "number", "minimum": 1, "exclusiveMinimum": true }),
            false,
        )
        .unwrap();
        assert!(!v.is_valid(&json!(1)));
        assert!(v.is_valid(&json!(1.5)));

        let v = compile(
            json!({ "type": "number", "maximum": 5, "exclusiveMaximum": false }),
            false,
        )
        .unwrap();
        assert!(v.is_valid(&json!(5)));
    }

    #[test]
    fn test_multiple_of() {
        let v = compile(json!({ "type": "number", "multipleOf": 0.5 }), false).unwrap();
        assert!(v.is_valid(&json!(1.5)));
        let err = v.parse(&json!(1.2)).unwrap_err();
        assert_eq!(err.codes(), vec![IssueCode::NotMultipleOf]);

        assert!(compile(json!({ "type": "number", "multipleOf": 0 }), false).is_err());
    }

    #[test]
    fn test_custom_message_on_bound() {
        let v = compile(
            json!({ "type": "integer", "minimum": 18, "errorMessage": { "minimum": "adults only" } }),
            true,
        )
        .unwrap();
        let err = v.parse(&json!(17)).unwrap_err();
        assert_eq!(err.issues[0].message, "adults only");
    }
}
