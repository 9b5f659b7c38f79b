//! The compiled validator tree.
//!
//! A [`Validator`] is a pure function of the schema it was compiled from.
//! It owns its children outright and holds no interior state, so one
//! instance can be shared across threads and reused for any number of
//! [`Validator::parse`] calls.

mod checks;
mod export;
mod format;
mod issue;

use serde_json::{Map, Value};

pub use checks::{
    ArrayCheck, ArrayRule, Check, NumberCheck, NumberRule, ObjectCheck, ObjectRule, StringCheck,
    StringRule,
};
pub use format::StringFormat;
pub use issue::{IssueCode, ValidationError, ValidationIssue};

use crate::schema_utils::{build_path, is_integral, json_equal, json_type_name};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One node of the compiled tree: a shape plus cross-cutting modifiers.
#[derive(Debug, Clone)]
pub struct Validator {
    pub(crate) kind: ValidatorKind,
    pub(crate) modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub enum ValidatorKind {
    /// Accepts any value.
    Any,
    /// Rejects every value (the `false` schema).
    Never,
    String(StringValidator),
    Number(NumberValidator),
    Boolean,
    Null,
    Literal(Value),
    Enum(Vec<Value>),
    Array(ArrayValidator),
    /// Fixed-length, positionally-typed array.
    Tuple(Vec<Validator>),
    Object(ObjectValidator),
    /// At least one alternative accepts; the first that does wins.
    Union(Vec<Validator>),
    /// Exactly one alternative accepts.
    ExclusiveUnion(Vec<Validator>),
    /// Every branch accepts independently.
    Intersection(Vec<Validator>),
}

#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    pub checks: Vec<StringCheck>,
}

#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    pub integer: bool,
    pub checks: Vec<NumberCheck>,
}

#[derive(Debug, Clone)]
pub struct ArrayValidator {
    pub element: Box<Validator>,
    pub checks: Vec<ArrayCheck>,
}

#[derive(Debug, Clone)]
pub struct ObjectValidator {
    pub fields: Vec<ObjectField>,
    pub unknown_keys: UnknownKeys,
    pub checks: Vec<ObjectCheck>,
}

#[derive(Debug, Clone)]
pub struct ObjectField {
    pub name: String,
    pub validator: Validator,
    pub required: bool,
}

/// Policy for keys not declared in `properties`.
#[derive(Debug, Clone)]
pub enum UnknownKeys {
    /// `additionalProperties: false`.
    Reject,
    /// `additionalProperties: true` or absent; keys are kept untyped.
    Accept,
    /// `additionalProperties: {schema}`.
    Validate(Box<Validator>),
}

/// Modifiers layered uniformly by the dispatcher on every variant.
#[derive(Debug, Clone, Default)]
pub struct Modifiers {
    pub nullable: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub title: Option<String>,
    /// Enum membership refinement on an otherwise typed node.
    pub allowed: Option<Vec<Value>>,
    pub not: Option<Box<Validator>>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Validator {
    pub fn new(kind: ValidatorKind) -> Self {
        Self {
            kind,
            modifiers: Modifiers::default(),
        }
    }

    pub fn any() -> Self {
        Self::new(ValidatorKind::Any)
    }

    pub fn kind(&self) -> &ValidatorKind {
        &self.kind
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn nullable(mut self) -> Self {
        self.modifiers.nullable = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.modifiers.default = Some(value);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.modifiers.description = Some(description.into());
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.modifiers.title = Some(title.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.modifiers.description.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.modifiers.title.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.modifiers.default.as_ref()
    }

    pub fn is_nullable(&self) -> bool {
        self.modifiers.nullable
    }
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

impl Validator {
    /// Validate `value` and return the coerced output.
    ///
    /// The output equals the input except that absent optional object
    /// fields with a `default` are filled in.
    pub fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
        let mut issues = Vec::new();
        let output = self.run(value, "", &mut issues);
        if issues.is_empty() {
            Ok(output)
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Alias of [`Validator::parse`].
    pub fn safe_parse(&self, value: &Value) -> Result<Value, ValidationError> {
        self.parse(value)
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.parse(value).is_ok()
    }

    /// Run this node against `value`, appending issues. The returned value is
    /// only meaningful when no issue was appended.
    pub(crate) fn run(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Value {
        if value.is_null() && self.modifiers.nullable {
            return Value::Null;
        }

        let before = issues.len();
        let output = self.kind.run(value, path, issues);
        if issues.len() > before {
            return output;
        }

        if let Some(allowed) = &self.modifiers.allowed {
            if !allowed.iter().any(|a| json_equal(a, value)) {
                issues.push(ValidationIssue::new(
                    path,
                    IssueCode::InvalidEnumValue,
                    format!("Invalid enum value. Expected one of {}", list_values(allowed)),
                ));
            }
        }

        if let Some(not) = &self.modifiers.not {
            if not.is_valid(value) {
                issues.push(ValidationIssue::new(
                    path,
                    IssueCode::Forbidden,
                    "Value must not match the excluded schema",
                ));
            }
        }

        output
    }
}

impl ValidatorKind {
    fn run(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Value {
        match self {
            ValidatorKind::Any => value.clone(),
            ValidatorKind::Never => {
                issues.push(ValidationIssue::new(
                    path,
                    IssueCode::Forbidden,
                    "No value is allowed here",
                ));
                value.clone()
            }
            ValidatorKind::String(v) => {
                match value {
                    Value::String(s) => {
                        issues.extend(v.checks.iter().filter_map(|c| c.apply(s, path)));
                    }
                    other => issues.push(invalid_type(path, "string", other)),
                }
                value.clone()
            }
            ValidatorKind::Number(v) => {
                match value {
                    Value::Number(n) if v.integer && !is_integral(n) => {
                        issues.push(invalid_type(path, "integer", value));
                    }
                    Value::Number(n) => {
                        let f = n.as_f64().unwrap_or(f64::NAN);
                        issues.extend(v.checks.iter().filter_map(|c| c.apply(f, path)));
                    }
                    other => {
                        let expected = if v.integer { "integer" } else { "number" };
                        issues.push(invalid_type(path, expected, other));
                    }
                }
                value.clone()
            }
            ValidatorKind::Boolean => {
                if !value.is_boolean() {
                    issues.push(invalid_type(path, "boolean", value));
                }
                value.clone()
            }
            ValidatorKind::Null => {
                if !value.is_null() {
                    issues.push(invalid_type(path, "null", value));
                }
                value.clone()
            }
            ValidatorKind::Literal(expected) => {
                if !json_equal(expected, value) {
                    issues.push(ValidationIssue::new(
                        path,
                        IssueCode::InvalidLiteral,
                        format!("Invalid literal value, expected {expected}"),
                    ));
                }
                value.clone()
            }
            ValidatorKind::Enum(values) => {
                if !values.iter().any(|v| json_equal(v, value)) {
                    issues.push(ValidationIssue::new(
                        path,
                        IssueCode::InvalidEnumValue,
                        format!("Invalid enum value. Expected one of {}", list_values(values)),
                    ));
                }
                value.clone()
            }
            ValidatorKind::Array(v) => run_array(v, value, path, issues),
            ValidatorKind::Tuple(items) => run_tuple(items, value, path, issues),
            ValidatorKind::Object(v) => run_object(v, value, path, issues),
            ValidatorKind::Union(alternatives) => run_union(alternatives, value, path, issues),
            ValidatorKind::ExclusiveUnion(alternatives) => {
                run_exclusive_union(alternatives, value, path, issues)
            }
            ValidatorKind::Intersection(branches) => {
                run_intersection(branches, value, path, issues)
            }
        }
    }
}

fn run_array(
    v: &ArrayValidator,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Value {
    let Value::Array(items) = value else {
        issues.push(invalid_type(path, "array", value));
        return value.clone();
    };

    issues.extend(v.checks.iter().filter_map(|c| c.apply(items, path)));

    let output = items
        .iter()
        .enumerate()
        .map(|(i, item)| v.element.run(item, &build_path(path, &[&i.to_string()]), issues))
        .collect();
    Value::Array(output)
}

fn run_tuple(
    positions: &[Validator],
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Value {
    let Value::Array(items) = value else {
        issues.push(invalid_type(path, "array", value));
        return value.clone();
    };

    if items.len() != positions.len() {
        let code = if items.len() < positions.len() {
            IssueCode::TooSmall
        } else {
            IssueCode::TooBig
        };
        issues.push(ValidationIssue::new(
            path,
            code,
            format!(
                "Array must contain exactly {} element(s), found {}",
                positions.len(),
                items.len()
            ),
        ));
        return value.clone();
    }

    let output = positions
        .iter()
        .zip(items)
        .enumerate()
        .map(|(i, (position, item))| position.run(item, &build_path(path, &[&i.to_string()]), issues))
        .collect();
    Value::Array(output)
}

fn run_object(
    v: &ObjectValidator,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Value {
    let Value::Object(input) = value else {
        issues.push(invalid_type(path, "object", value));
        return value.clone();
    };

    let mut output = Map::new();

    for field in &v.fields {
        match input.get(&field.name) {
            Some(child) => {
                let child_path = build_path(path, &[&field.name]);
                let parsed = field.validator.run(child, &child_path, issues);
                output.insert(field.name.clone(), parsed);
            }
            None => {
                if let Some(default) = field.validator.default_value() {
                    output.insert(field.name.clone(), default.clone());
                } else if field.required {
                    issues.push(ValidationIssue::new(
                        &build_path(path, &[&field.name]),
                        IssueCode::Required,
                        "Required",
                    ));
                }
            }
        }
    }

    let mut unrecognized = Vec::new();
    for (key, child) in input {
        if v.fields.iter().any(|f| &f.name == key) {
            continue;
        }
        match &v.unknown_keys {
            UnknownKeys::Reject => unrecognized.push(key.as_str()),
            UnknownKeys::Accept => {
                output.insert(key.clone(), child.clone());
            }
            UnknownKeys::Validate(extra) => {
                let parsed = extra.run(child, &build_path(path, &[key]), issues);
                output.insert(key.clone(), parsed);
            }
        }
    }
    if !unrecognized.is_empty() {
        issues.push(ValidationIssue::new(
            path,
            IssueCode::UnrecognizedKeys,
            format!("Unrecognized key(s) in object: {}", unrecognized.join(", ")),
        ));
    }

    issues.extend(v.checks.iter().filter_map(|c| c.apply(input.len(), path)));

    Value::Object(output)
}

fn run_union(
    alternatives: &[Validator],
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Value {
    for alternative in alternatives {
        let mut local = Vec::new();
        let output = alternative.run(value, path, &mut local);
        if local.is_empty() {
            return output;
        }
    }
    issues.push(ValidationIssue::new(
        path,
        IssueCode::InvalidUnion,
        format!(
            "Value does not match any of {} alternative(s)",
            alternatives.len()
        ),
    ));
    value.clone()
}

fn run_exclusive_union(
    alternatives: &[Validator],
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Value {
    let mut matched = Vec::new();
    for alternative in alternatives {
        let mut local = Vec::new();
        let output = alternative.run(value, path, &mut local);
        if local.is_empty() {
            matched.push(output);
        }
    }

    match matched.len() {
        1 => matched.remove(0),
        0 => {
            issues.push(ValidationIssue::new(
                path,
                IssueCode::InvalidUnion,
                format!(
                    "Value does not match any of {} alternative(s)",
                    alternatives.len()
                ),
            ));
            value.clone()
        }
        n => {
            issues.push(ValidationIssue::new(
                path,
                IssueCode::InvalidUnion,
                format!("Value matches {n} alternatives, expected exactly one"),
            ));
            value.clone()
        }
    }
}

fn run_intersection(
    branches: &[Validator],
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Value {
    let mut merged: Option<Value> = None;
    for branch in branches {
        let output = branch.run(value, path, issues);
        merged = Some(match (merged, output) {
            (None, output) => output,
            (Some(Value::Object(mut acc)), Value::Object(next)) => {
                for (key, val) in next {
                    acc.entry(key).or_insert(val);
                }
                Value::Object(acc)
            }
            (Some(first), _) => first,
        });
    }
    merged.unwrap_or_else(|| value.clone())
}

fn invalid_type(path: &str, expected: &str, received: &Value) -> ValidationIssue {
    ValidationIssue::new(
        path,
        IssueCode::InvalidType,
        format!(
            "Expected {expected}, received {}",
            json_type_name(received)
        ),
    )
}

fn list_values(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

// ===========================================================================
// Tests
// ===========================================================================
