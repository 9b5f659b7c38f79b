//! `type: "string"`.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::extend::{as_count, extend};
use crate::refs::Refs;
use crate::validator::{Check, StringFormat, StringRule, StringValidator, Validator, ValidatorKind};

pub(crate) fn parse_string(
    node: &Map<String, Value>,
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    let path = refs.path.as_str();
    let mut v = StringValidator::default();

    v = extend(v, node, "minLength", path, |mut v, value, message| {
        v.checks
            .push(Check::new(StringRule::MinLength(as_count(value)?), message));
        Ok(v)
    })?;
    v = extend(v, node, "maxLength", path, |mut v, value, message| {
        v.checks
            .push(Check::new(StringRule::MaxLength(as_count(value)?), message));
        Ok(v)
    })?;
    v = extend(v, node, "pattern", path, |mut v, value, message| {
        let pattern = value
            .as_str()
            .ok_or_else(|| SchemaError::malformed(path, "expected a string"))?;
        let re = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
            path: path.to_string(),
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        v.checks.push(Check::new(StringRule::Pattern(re), message));
        Ok(v)
    })?;
    v = extend(v, node, "format", path, |mut v, value, message| {
        let keyword = value
            .as_str()
            .ok_or_else(|| SchemaError::malformed(path, "expected a string"))?;
        match StringFormat::from_keyword(keyword) {
            Some(format) => v.checks.push(Check::new(StringRule::Format(format), message)),
            None => tracing::debug!(path, format = keyword, "ignoring unknown string format"),
        }
        Ok(v)
    })?;

    Ok(Validator::new(ValidatorKind::String(v)))
}
