//! Operation execution.
//!
//! Every operation first resolves the container that holds its target key,
//! then mutates that container. Operations whose paths carry predicate
//! segments are expanded into canonical paths up front and then executed
//! once per path, in expansion order.

use tracing::debug;

use crate::error::PatchError;
use crate::expand::expand;
use crate::node::Node;
use crate::resolve::{parse_path, resolve};
use crate::types::{ApplyOptions, Op};

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(root: &mut Node, path: &str, node: Node) -> Result<(), PatchError> {
    let (mut container, key) = resolve(root, path)?;
    container.add(&key, node)
}

fn apply_remove(root: &mut Node, path: &str) -> Result<Node, PatchError> {
    let (mut container, key) = resolve(root, path)?;
    container.remove(&key)
}

fn apply_replace(root: &mut Node, path: &str, node: Node) -> Result<(), PatchError> {
    let (mut container, key) = resolve(root, path)?;
    if container.get(&key)?.is_none() {
        return Err(PatchError::KeyNotFound(key));
    }
    container.set(&key, node)
}

/// The source is gone by the time the destination is resolved, so a bad
/// destination loses it.
fn apply_move(root: &mut Node, path: &str, from: &str) -> Result<(), PatchError> {
    let node = apply_remove(root, from)?;
    let (mut container, key) = resolve(root, path)?;
    container.set(&key, node)
}

fn apply_copy(root: &mut Node, path: &str, from: &str) -> Result<(), PatchError> {
    let node = {
        let (container, key) = resolve(root, from)?;
        container
            .get(&key)?
            .cloned()
            .ok_or_else(|| PatchError::KeyNotFound(key.clone()))?
    };
    let (mut container, key) = resolve(root, path)?;
    container.set(&key, node)
}

/// Perform `op` against one canonical `path`. `from` overrides the
/// operation's own source path when it was expanded.
fn perform(root: &mut Node, op: &Op, path: &str, from: Option<&str>) -> Result<(), PatchError> {
    debug!(op = op.op_name(), path, from, "applying operation");
    match op {
        Op::Add { value, .. } => apply_add(root, path, Node::new(value.clone())),
        Op::Remove { .. } => apply_remove(root, path).map(drop),
        Op::Replace { value, .. } => apply_replace(root, path, Node::new(value.clone())),
        Op::Move { from: raw, .. } => apply_move(root, path, from.unwrap_or(raw.as_str())),
        Op::Copy { from: raw, .. } => apply_copy(root, path, from.unwrap_or(raw.as_str())),
    }
}

// ── Path expansion ────────────────────────────────────────────────────────

/// The canonical paths a raw operation path stands for.
///
/// A literal path stands for itself. A predicate path is expanded against the
/// current tree; `None` means it matched nothing.
fn targets(root: &Node, raw: &str) -> Result<Option<Vec<String>>, PatchError> {
    let pointer = parse_path(raw)?;
    if !pointer.is_extended() {
        return Ok(Some(vec![raw.to_string()]));
    }
    let expanded = expand(root, &pointer)?;
    if expanded.is_empty() {
        return Ok(None);
    }
    Ok(Some(expanded.into_iter().map(|p| p.to_string()).collect()))
}

fn unmatched(op: &Op, raw: &str, options: &ApplyOptions) -> Result<(), PatchError> {
    if options.fail_on_unmatched {
        return Err(PatchError::PathNotFound(raw.to_string()));
    }
    debug!(op = op.op_name(), path = raw, "predicate path matched nothing, skipping");
    Ok(())
}

// ── Main apply functions ──────────────────────────────────────────────────

/// Apply a single operation to the tree rooted at `root`.
///
/// When both `path` and `from` carry predicates, the operation runs once per
/// (from, path) pair with `from` varying slowest.
pub fn apply_op(root: &mut Node, op: &Op, options: &ApplyOptions) -> Result<(), PatchError> {
    let Some(paths) = targets(root, op.path())? else {
        return unmatched(op, op.path(), options);
    };
    let Some(from) = op.from() else {
        for path in &paths {
            perform(root, op, path, None)?;
        }
        return Ok(());
    };
    let Some(froms) = targets(root, from)? else {
        return unmatched(op, from, options);
    };
    for from in &froms {
        for path in &paths {
            perform(root, op, path, Some(from))?;
        }
    }
    Ok(())
}

/// Apply operations in order, stopping at the first failure.
///
/// Failures are wrapped in [`PatchError::Operation`] with the position and
/// paths of the failing operation. Mutations made before the failure stay.
pub fn apply_ops(root: &mut Node, ops: &[Op], options: &ApplyOptions) -> Result<(), PatchError> {
    for (index, op) in ops.iter().enumerate() {
        apply_op(root, op, options).map_err(|source| PatchError::Operation {
            index,
            op: op.op_name(),
            path: op.path().to_string(),
            from: op.from().map(str::to_string),
            source: Box::new(source),
        })?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────
