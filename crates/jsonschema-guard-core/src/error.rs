//! Error types for schema compilation.
//!
//! [`SchemaError`] is the internal taxonomy raised anywhere in the recursive
//! descent. The public entry points wrap it exactly once into
//! [`CompileError`], so callers only ever handle one error kind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// Variant names and their serialized `snake_case` strings are part of the
/// public contract and must not change across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// A node could not be classified or carries ill-typed keyword values.
    MalformedNode,
    /// The schema uses a construct outside the supported subset.
    UnsupportedFeature,
    /// A local `$ref` pointer did not resolve.
    UnresolvableRef,
    /// A `$ref` pointer reappeared along the current descent.
    CycleDetected,
    /// Nesting exceeded `CompileOptions::max_depth`.
    RecursionDepthExceeded,
    /// A `pattern` keyword is not a valid regular expression.
    InvalidPattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Malformed schema node at {path}: {message}")]
    MalformedNode { path: String, message: String },

    #[error("Unsupported schema feature at {path}: {feature}")]
    UnsupportedFeature { path: String, feature: String },

    #[error("Unresolvable $ref at {path}: {reference}")]
    UnresolvableRef { path: String, reference: String },

    #[error("Cyclic $ref detected at {path}: {reference}")]
    CycleDetected { path: String, reference: String },

    #[error("Recursion depth exceeded at {path} (max: {max_depth})")]
    RecursionDepthExceeded { path: String, max_depth: usize },

    #[error("Invalid pattern at {path}: {pattern} ({message})")]
    InvalidPattern {
        path: String,
        pattern: String,
        message: String,
    },
}

impl SchemaError {
    /// Shorthand for the most common variant.
    pub(crate) fn malformed(path: &str, message: impl Into<String>) -> Self {
        SchemaError::MalformedNode {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchemaError::MalformedNode { .. } => ErrorCode::MalformedNode,
            SchemaError::UnsupportedFeature { .. } => ErrorCode::UnsupportedFeature,
            SchemaError::UnresolvableRef { .. } => ErrorCode::UnresolvableRef,
            SchemaError::CycleDetected { .. } => ErrorCode::CycleDetected,
            SchemaError::RecursionDepthExceeded { .. } => ErrorCode::RecursionDepthExceeded,
            SchemaError::InvalidPattern { .. } => ErrorCode::InvalidPattern,
        }
    }

    /// The schema path (JSON Pointer) where the failure was detected.
    pub fn path(&self) -> &str {
        match self {
            SchemaError::MalformedNode { path, .. }
            | SchemaError::UnsupportedFeature { path, .. }
            | SchemaError::UnresolvableRef { path, .. }
            | SchemaError::CycleDetected { path, .. }
            | SchemaError::RecursionDepthExceeded { path, .. }
            | SchemaError::InvalidPattern { path, .. } => path,
        }
    }
}

/// The single error returned by [`crate::compile`].
///
/// Carries the original [`SchemaError`] as its `source`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to compile JSON Schema: {source}")]
pub struct CompileError {
    #[source]
    source: SchemaError,
}

impl CompileError {
    pub fn cause(&self) -> &SchemaError {
        &self.source
    }

    pub fn into_cause(self) -> SchemaError {
        self.source
    }

    pub fn error_code(&self) -> ErrorCode {
        self.source.error_code()
    }

    pub fn path(&self) -> &str {
        self.source.path()
    }

    /// Produces a structured JSON error.
    ///
    /// Format: `{"code": "...", "message": "...", "path": "..."}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.source.to_string(),
            "path": self.path(),
        })
    }
}

impl From<SchemaError> for CompileError {
    fn from(source: SchemaError) -> Self {
        CompileError { source }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
