use std::ops::Deref;

use serde_json::Value;
use tracing::debug;

use crate::apply::apply_ops;
use crate::error::PatchError;
use crate::node::Node;
use crate::types::{ApplyOptions, Op};

/// An ordered list of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Vec<Op>);

impl Patch {
    pub fn new(ops: Vec<Op>) -> Self {
        Patch(ops)
    }

    pub fn ops(&self) -> &[Op] {
        &self.0
    }

    pub fn push(&mut self, op: Op) {
        self.0.push(op);
    }

    /// Apply the patch to `doc` with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use yaml_patch::{Op, Patch};
    ///
    /// let patch = Patch::new(vec![Op::Add {
    ///     path: "/baz".into(),
    ///     value: json!("qux"),
    /// }]);
    /// let doc = patch.apply(json!({"foo": "bar"})).unwrap();
    /// assert_eq!(doc, json!({"foo": "bar", "baz": "qux"}));
    /// ```
    pub fn apply(&self, doc: Value) -> Result<Value, PatchError> {
        self.apply_with(doc, &ApplyOptions::default())
    }

    pub fn apply_with(&self, doc: Value, options: &ApplyOptions) -> Result<Value, PatchError> {
        let mut root = Node::new(doc);
        self.apply_to_node(&mut root, options)?;
        Ok(root.into_value())
    }

    /// Apply the patch in place.
    ///
    /// The root must be a mapping or a sequence, even for an empty patch.
    /// On failure the operations before the failing one have already been
    /// applied to `root`.
    pub fn apply_to_node(&self, root: &mut Node, options: &ApplyOptions) -> Result<(), PatchError> {
        root.container()?;
        debug!(ops = self.0.len(), "applying patch");
        apply_ops(root, &self.0, options)
    }
}

impl Deref for Patch {
    type Target = [Op];

    fn deref(&self) -> &[Op] {
        &self.0
    }
}

impl From<Vec<Op>> for Patch {
    fn from(ops: Vec<Op>) -> Self {
        Patch(ops)
    }
}

impl FromIterator<Op> for Patch {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Patch(iter.into_iter().collect())
    }
}

impl IntoIterator for Patch {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
