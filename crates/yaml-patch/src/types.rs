//! Patch operations and apply options.

use serde_json::Value;

/// A single patch operation.
///
/// Paths are kept as written. They may contain `key=value` predicate
/// segments, which are expanded against the document when the operation is
/// applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { path: String, from: String },
    Copy { path: String, from: String },
}

impl Op {
    /// The operation name as written in a patch document.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. } => path,
        }
    }

    /// The source path of `move` and `copy`.
    pub fn from(&self) -> Option<&str> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// The value carried by `add` and `replace`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Options for applying a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Fail with [`PatchError::PathNotFound`](crate::PatchError::PathNotFound)
    /// when a predicate path matches nothing, instead of skipping the
    /// operation.
    pub fail_on_unmatched: bool,
}
