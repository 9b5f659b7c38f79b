//! Refinements attached to base validators by the constraint extension helper.
//!
//! Every check carries an optional custom message. When absent, the default
//! message for the rule is used.

use regex::Regex;
use serde_json::Value;

use super::format::StringFormat;
use super::issue::{IssueCode, ValidationIssue};
use crate::schema_utils::json_equal;

/// A rule plus the custom message to report when it fails.
#[derive(Debug, Clone)]
pub struct Check<R> {
    pub rule: R,
    pub message: Option<String>,
}

impl<R> Check<R> {
    pub fn new(rule: R, message: Option<String>) -> Self {
        Self { rule, message }
    }

    fn issue(&self, path: &str, code: IssueCode, default: String) -> ValidationIssue {
        let message = self.message.clone().unwrap_or(default);
        ValidationIssue::new(path, code, message)
    }
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum StringRule {
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    Format(StringFormat),
}

pub type StringCheck = Check<StringRule>;

impl StringCheck {
    pub(crate) fn apply(&self, s: &str, path: &str) -> Option<ValidationIssue> {
        match &self.rule {
            StringRule::MinLength(min) => {
                let len = s.chars().count();
                (len < *min).then(|| {
                    self.issue(
                        path,
                        IssueCode::TooSmall,
                        format!("String must contain at least {min} character(s)"),
                    )
                })
            }
            StringRule::MaxLength(max) => {
                let len = s.chars().count();
                (len > *max).then(|| {
                    self.issue(
                        path,
                        IssueCode::TooBig,
                        format!("String must contain at most {max} character(s)"),
                    )
                })
            }
            StringRule::Pattern(re) => (!re.is_match(s)).then(|| {
                self.issue(
                    path,
                    IssueCode::InvalidString,
                    format!("String must match pattern {}", re.as_str()),
                )
            }),
            StringRule::Format(format) => (!format.matches(s)).then(|| {
                self.issue(
                    path,
                    IssueCode::InvalidString,
                    format!("Invalid {}", format.as_str()),
                )
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberRule {
    Minimum(f64),
    Maximum(f64),
    ExclusiveMinimum(f64),
    ExclusiveMaximum(f64),
    MultipleOf(f64),
}

pub type NumberCheck = Check<NumberRule>;

impl NumberCheck {
    pub(crate) fn apply(&self, n: f64, path: &str) -> Option<ValidationIssue> {
        match self.rule {
            NumberRule::Minimum(min) => (n < min).then(|| {
                self.issue(
                    path,
                    IssueCode::TooSmall,
                    format!("Number must be greater than or equal to {min}"),
                )
            }),
            NumberRule::Maximum(max) => (n > max).then(|| {
                self.issue(
                    path,
                    IssueCode::TooBig,
                    format!("Number must be less than or equal to {max}"),
                )
            }),
            NumberRule::ExclusiveMinimum(min) => (n <= min).then(|| {
                self.issue(
                    path,
                    IssueCode::TooSmall,
                    format!("Number must be greater than {min}"),
                )
            }),
            NumberRule::ExclusiveMaximum(max) => (n >= max).then(|| {
                self.issue(
                    path,
                    IssueCode::TooBig,
                    format!("Number must be less than {max}"),
                )
            }),
            NumberRule::MultipleOf(step) => {
                let quotient = n / step;
                let off = (quotient - quotient.round()).abs();
                (off > 1e-9).then(|| {
                    self.issue(
                        path,
                        IssueCode::NotMultipleOf,
                        format!("Number must be a multiple of {step}"),
                    )
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Array
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayRule {
    MinItems(usize),
    MaxItems(usize),
    UniqueItems,
}

pub type ArrayCheck = Check<ArrayRule>;

impl ArrayCheck {
    pub(crate) fn apply(&self, items: &[Value], path: &str) -> Option<ValidationIssue> {
        match self.rule {
            ArrayRule::MinItems(min) => (items.len() < min).then(|| {
                self.issue(
                    path,
                    IssueCode::TooSmall,
                    format!("Array must contain at least {min} element(s)"),
                )
            }),
            ArrayRule::MaxItems(max) => (items.len() > max).then(|| {
                self.issue(
                    path,
                    IssueCode::TooBig,
                    format!("Array must contain at most {max} element(s)"),
                )
            }),
            ArrayRule::UniqueItems => {
                let duplicate = items
                    .iter()
                    .enumerate()
                    .any(|(i, a)| items[i + 1..].iter().any(|b| json_equal(a, b)));
                duplicate.then(|| {
                    self.issue(
                        path,
                        IssueCode::NotUnique,
                        "Array items must be unique".to_string(),
                    )
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRule {
    MinProperties(usize),
    MaxProperties(usize),
}

pub type ObjectCheck = Check<ObjectRule>;

impl ObjectCheck {
    pub(crate) fn apply(&self, count: usize, path: &str) -> Option<ValidationIssue> {
        match self.rule {
            ObjectRule::MinProperties(min) => (count < min).then(|| {
                self.issue(
                    path,
                    IssueCode::TooSmall,
                    format!("Object must contain at least {min} propert(ies)"),
                )
            }),
            ObjectRule::MaxProperties(max) => (count > max).then(|| {
                self.issue(
                    path,
                    IssueCode::TooBig,
                    format!("Object must contain at most {max} propert(ies)"),
                )
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_custom_message_overrides_default() {
        let check = StringCheck::new(StringRule::MinLength(3), Some("too short!".to_string()));
        let issue = check.apply("ab", "/name").unwrap();
        assert_eq!(issue.message, "too short!");
        assert_eq!(issue.code, IssueCode::TooSmall);
        assert_eq!(issue.path, "/name");
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let check = StringCheck::new(StringRule::MaxLength(2), None);
        assert!(check.apply("üß", "").is_none());
        assert!(check.apply("üßa", "").is_some());
    }

    #[test]
    fn test_number_bounds() {
        let min = NumberCheck::new(NumberRule::ExclusiveMinimum(0.0), None);
        assert!(min.apply(0.0, "").is_some());
        assert!(min.apply(0.1, "").is_none());

        let step = NumberCheck::new(NumberRule::MultipleOf(0.1), None);
        assert!(step.apply(0.3, "").is_none());
        assert!(step.apply(0.35, "").is_some());
    }

    #[test]
    fn test_unique_items_compares_numbers_by_value() {
        let check = ArrayCheck::new(ArrayRule::UniqueItems, None);
        assert!(check.apply(&[json!(1), json!(1.0)], "").is_some());
        assert!(check.apply(&[json!(1), json!("1")], "").is_none());
    }
}
