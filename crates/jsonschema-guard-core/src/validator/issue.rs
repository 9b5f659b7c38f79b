//! Validation failures reported by [`super::Validator::parse`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IssueCode {
    InvalidType,
    InvalidLiteral,
    InvalidEnumValue,
    InvalidString,
    TooSmall,
    TooBig,
    NotMultipleOf,
    NotUnique,
    Required,
    UnrecognizedKeys,
    InvalidUnion,
    /// Rejected by `false`, `not`, or an empty intersection of types.
    Forbidden,
}

/// A single problem found in an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Instance location (JSON Pointer, `/` for the root).
    pub path: String,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub(crate) fn new(path: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            },
            code,
            message: message.into(),
        }
    }
}

/// Every issue found while parsing one instance.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{} validation issue(s): {}", .issues.len(), summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn codes(&self) -> Vec<IssueCode> {
        self.issues.iter().map(|i| i.code).collect()
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_issue_path_is_slash() {
        let issue = ValidationIssue::new("", IssueCode::Required, "missing");
        assert_eq!(issue.path, "/");
    }

    #[test]
    fn test_display_lists_every_issue() {
        let err = ValidationError {
            issues: vec![
                ValidationIssue::new("/name", IssueCode::Required, "Required"),
                ValidationIssue::new("/age", IssueCode::InvalidType, "Expected number"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "2 validation issue(s): /name: Required; /age: Expected number"
        );
    }
}
