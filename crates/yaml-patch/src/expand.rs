//! Expansion of `key=value` predicate paths into canonical pointers.
//!
//! `/jobs/name=build/plan` is expanded by walking a frontier of
//! `(canonical prefix, subtree)` pairs. A literal segment steps into a key or
//! index. A predicate segment searches the whole subtree, depth first, for
//! mappings whose `name` is the string `build`, and yields one frontier entry
//! per match. Matches come out in document order.

use tracing::debug;
use yaml_patch_pointer::{Pointer, Segment};

use crate::error::PatchError;
use crate::node::{Node, View};

type Frontier<'a> = Vec<(Vec<String>, View<'a>)>;

/// Expand `pointer` against the tree rooted at `root`.
///
/// Intermediate literal segments must exist; entries where they don't are
/// dropped. The final segment, when literal, is kept whether or not it
/// exists yet, since it names the key an operation will act on.
///
/// # Errors
///
/// [`PatchError::TypeMismatch`] when a segment has to be applied to a scalar.
pub fn expand(root: &Node, pointer: &Pointer) -> Result<Vec<Pointer>, PatchError> {
    let segments: Vec<Segment> = pointer.segments().collect();
    let last = segments.len().saturating_sub(1);

    let mut frontier: Frontier<'_> = vec![(Vec::new(), root.view())];
    let mut targets: Vec<Vec<String>> = Vec::new();

    for (position, segment) in segments.iter().enumerate() {
        let mut next = Frontier::new();
        for (prefix, view) in frontier {
            if !view.is_container() {
                return Err(PatchError::TypeMismatch(view.type_name()));
            }
            match segment {
                Segment::Literal(key) if position == last => {
                    let mut path = prefix;
                    path.push(key.clone());
                    targets.push(path);
                }
                Segment::Literal(key) => {
                    if let Some(child) = view.get(key) {
                        let mut path = prefix;
                        path.push(key.clone());
                        next.push((path, child));
                    }
                }
                Segment::Predicate { key, value } => {
                    find_all(&prefix, view, key, value, &mut next);
                }
            }
        }
        frontier = next;
    }
    targets.extend(frontier.into_iter().map(|(path, _)| path));

    debug!(
        pointer = pointer.as_str(),
        segments = segments.len(),
        matches = targets.len(),
        "expanded predicate path"
    );
    Ok(targets
        .iter()
        .map(|path| Pointer::from_components(path))
        .collect())
}

/// Collect every position under `view` (including `view` itself) whose
/// mapping has `key` set to the string `value`. A match is not searched any
/// deeper.
fn find_all<'a>(prefix: &[String], view: View<'a>, key: &str, value: &str, out: &mut Frontier<'a>) {
    if view.is_map() && view.get(key).and_then(View::as_str) == Some(value) {
        out.push((prefix.to_vec(), view));
        return;
    }
    for (child_key, child) in view.entries() {
        if !child.is_container() {
            continue;
        }
        let mut path = prefix.to_vec();
        path.push(child_key);
        find_all(&path, child, key, value, out);
    }
}
