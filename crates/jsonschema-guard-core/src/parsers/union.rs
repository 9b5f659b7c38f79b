//! Combinators: `anyOf`, `oneOf`, `allOf`.

use serde_json::Value;

use super::parse_schema;
use crate::error::SchemaError;
use crate::refs::Refs;
use crate::validator::{Validator, ValidatorKind};

pub(crate) fn parse_any_of(
    alternatives: &[Value],
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    let validators = parse_each(alternatives, "anyOf", refs)?;
    Ok(single_or(validators, ValidatorKind::Union))
}

pub(crate) fn parse_one_of(
    alternatives: &[Value],
    refs: &Refs<'_>,
) -> Result<Validator, SchemaError> {
    let validators = parse_each(alternatives, "oneOf", refs)?;
    Ok(single_or(validators, ValidatorKind::ExclusiveUnion))
}

pub(crate) fn parse_all_of(branches: &[Value], refs: &Refs<'_>) -> Result<Validator, SchemaError> {
    let validators = parse_each(branches, "allOf", refs)?;
    Ok(single_or(validators, ValidatorKind::Intersection))
}

fn parse_each(
    schemas: &[Value],
    keyword: &str,
    refs: &Refs<'_>,
) -> Result<Vec<Validator>, SchemaError> {
    schemas
        .iter()
        .enumerate()
        .map(|(i, schema)| parse_schema(schema, &refs.descend(&[keyword, &i.to_string()])?))
        .collect()
}

/// A one-element combinator compiles to its only member.
fn single_or(
    mut validators: Vec<Validator>,
    combine: fn(Vec<Validator>) -> ValidatorKind,
) -> Validator {
    match validators.len() {
        1 => validators.remove(0),
        _ => Validator::new(combine(validators)),
    }
}
