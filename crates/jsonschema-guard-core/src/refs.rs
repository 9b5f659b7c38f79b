//! Reference context threaded through every recursive compile step.
//!
//! A [`Refs`] is never mutated in place. Descending into a child node
//! produces a new context with an extended path (and, across a `$ref`, an
//! extended `seen` list), so sibling subtrees never observe each other's
//! state.

use serde_json::{Map, Value};

use crate::config::CompileOptions;
use crate::error::SchemaError;
use crate::schema_utils::build_path;

#[derive(Debug, Clone)]
pub(crate) struct Refs<'a> {
    /// JSON Pointer of the node being compiled.
    pub path: String,
    /// `$ref` pointers resolved along the current descent, outermost first.
    pub seen: Vec<String>,
    pub depth: usize,
    max_depth: usize,
    /// The document `$ref` pointers resolve against (never the pruned copy).
    root: &'a Value,
    /// Definitions supplied alongside the root schema.
    definitions: Option<&'a Map<String, Value>>,
}

impl<'a> Refs<'a> {
    pub fn new(
        root: &'a Value,
        definitions: Option<&'a Map<String, Value>>,
        options: &CompileOptions,
    ) -> Self {
        Self {
            path: "#".to_string(),
            seen: Vec::new(),
            depth: 0,
            max_depth: options.max_depth,
            root,
            definitions,
        }
    }

    /// Context for a child node at `path/segments...`.
    pub fn descend(&self, segments: &[&str]) -> Result<Self, SchemaError> {
        let path = build_path(&self.path, segments);
        if self.depth + 1 > self.max_depth {
            return Err(SchemaError::RecursionDepthExceeded {
                path,
                max_depth: self.max_depth,
            });
        }
        Ok(Self {
            path,
            depth: self.depth + 1,
            ..self.clone()
        })
    }

    /// Context for the target of `$ref: pointer`. Fails if the pointer was
    /// already resolved on this descent.
    pub fn enter_ref(&self, pointer: &str) -> Result<Self, SchemaError> {
        if self.seen.iter().any(|p| p == pointer) {
            return Err(SchemaError::CycleDetected {
                path: self.path.clone(),
                reference: pointer.to_string(),
            });
        }
        if self.depth + 1 > self.max_depth {
            return Err(SchemaError::RecursionDepthExceeded {
                path: self.path.clone(),
                max_depth: self.max_depth,
            });
        }
        let mut seen = self.seen.clone();
        seen.push(pointer.to_string());
        Ok(Self {
            path: pointer.to_string(),
            seen,
            depth: self.depth + 1,
            ..self.clone()
        })
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn definitions(&self) -> Option<&'a Map<String, Value>> {
        self.definitions
    }
}
