//! Configuration for schema compilation.

use serde::{Deserialize, Serialize};

/// Options for [`crate::compile`].
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g. `max-depth`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CompileOptions {
    /// Compile only the mandatory shape: the root object's non-required
    /// properties are pruned before compilation, and objects without an
    /// explicit `additionalProperties` reject unknown keys.
    pub strict: bool,
    /// Maximum nesting depth of the descent (stack overflow guard).
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: 50,
        }
    }
}

impl CompileOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}
