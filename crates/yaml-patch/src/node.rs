//! Lazily materialized document nodes.
//!
//! A [`Node`] starts out wrapping a plain [`Value`]. The first structural
//! access turns a mapping or sequence into a container of child nodes, and
//! that container form is kept from then on. Scalars never materialize.

use std::mem;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::container::Container;
use crate::error::PatchError;

/// Children of a materialized mapping, in document order.
pub type NodeMap = IndexMap<String, Node>;

/// Children of a materialized sequence.
pub type NodeSeq = Vec<Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Not yet materialized, or a scalar.
    Raw(Value),
    Map(NodeMap),
    Seq(NodeSeq),
}

impl Node {
    pub fn new(value: Value) -> Self {
        Node::Raw(value)
    }

    /// The node used to fill gaps when a sequence is extended.
    pub fn nil() -> Self {
        Node::Raw(Value::Null)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Seq(_) | Node::Raw(Value::Array(_)))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_) | Node::Raw(Value::Object(_)))
    }

    pub fn is_materialized(&self) -> bool {
        !matches!(self, Node::Raw(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Raw(value) => value_type_name(value),
            Node::Map(_) => "mapping",
            Node::Seq(_) => "sequence",
        }
    }

    /// Convert a raw mapping or sequence into its container form.
    ///
    /// Does nothing for scalars and for nodes that are already materialized.
    pub fn materialize(&mut self) {
        let materialized = match self {
            Node::Raw(Value::Object(map)) => Node::Map(
                mem::take(map)
                    .into_iter()
                    .map(|(key, value)| (key, Node::new(value)))
                    .collect(),
            ),
            Node::Raw(Value::Array(items)) => {
                Node::Seq(mem::take(items).into_iter().map(Node::new).collect())
            }
            _ => return,
        };
        trace!(kind = materialized.type_name(), "materialized node");
        *self = materialized;
    }

    /// Borrow this node as a container, materializing it first.
    ///
    /// # Errors
    ///
    /// [`PatchError::TypeMismatch`] if the node is a scalar.
    pub fn container(&mut self) -> Result<Container<'_>, PatchError> {
        self.materialize();
        match self {
            Node::Map(map) => Ok(Container::Map(map)),
            Node::Seq(seq) => Ok(Container::Seq(seq)),
            Node::Raw(value) => Err(PatchError::TypeMismatch(value_type_name(value))),
        }
    }

    pub fn as_map_container(&mut self) -> Result<&mut NodeMap, PatchError> {
        self.materialize();
        match self {
            Node::Map(map) => Ok(map),
            other => Err(PatchError::TypeMismatch(other.type_name())),
        }
    }

    pub fn as_sequence_container(&mut self) -> Result<&mut NodeSeq, PatchError> {
        self.materialize();
        match self {
            Node::Seq(seq) => Ok(seq),
            other => Err(PatchError::TypeMismatch(other.type_name())),
        }
    }

    /// A read-only view that walks raw and materialized parts alike.
    pub fn view(&self) -> View<'_> {
        match self {
            Node::Raw(value) => View::Raw(value),
            Node::Map(map) => View::Map(map),
            Node::Seq(seq) => View::Seq(seq),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Node::Raw(value) => value,
            Node::Map(map) => Value::Object(
                map.into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect(),
            ),
            Node::Seq(seq) => Value::Array(seq.into_iter().map(Node::into_value).collect()),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(value)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.into_value()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Raw(value) => value.serialize(serializer),
            Node::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, node) in map {
                    out.serialize_entry(key, node)?;
                }
                out.end()
            }
            Node::Seq(seq) => {
                let mut out = serializer.serialize_seq(Some(seq.len()))?;
                for node in seq {
                    out.serialize_element(node)?;
                }
                out.end()
            }
        }
    }
}

/// Borrowed, read-only view of a node or of a value inside a raw node.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Raw(&'a Value),
    Map(&'a NodeMap),
    Seq(&'a NodeSeq),
}

impl<'a> View<'a> {
    pub fn is_map(self) -> bool {
        matches!(self, View::Map(_) | View::Raw(Value::Object(_)))
    }

    pub fn is_container(self) -> bool {
        matches!(
            self,
            View::Map(_) | View::Seq(_) | View::Raw(Value::Object(_) | Value::Array(_))
        )
    }

    pub fn as_str(self) -> Option<&'a str> {
        match self {
            View::Raw(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            View::Raw(value) => value_type_name(value),
            View::Map(_) => "mapping",
            View::Seq(_) => "sequence",
        }
    }

    /// The child at a mapping key or an in-range sequence index.
    pub fn get(self, key: &str) -> Option<View<'a>> {
        match self {
            View::Raw(Value::Object(map)) => map.get(key).map(View::Raw),
            View::Raw(Value::Array(items)) => items.get(sequence_index(key)?).map(View::Raw),
            View::Map(map) => map.get(key).map(Node::view),
            View::Seq(seq) => seq.get(sequence_index(key)?).map(Node::view),
            View::Raw(_) => None,
        }
    }

    /// Children with their keys, in document order. Sequence keys are the
    /// decimal indices. Scalars have no children.
    pub fn entries(self) -> Vec<(String, View<'a>)> {
        match self {
            View::Raw(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (key.clone(), View::Raw(value)))
                .collect(),
            View::Raw(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, value)| (i.to_string(), View::Raw(value)))
                .collect(),
            View::Map(map) => map
                .iter()
                .map(|(key, node)| (key.clone(), node.view()))
                .collect(),
            View::Seq(seq) => seq
                .iter()
                .enumerate()
                .map(|(i, node)| (i.to_string(), node.view()))
                .collect(),
            View::Raw(_) => Vec::new(),
        }
    }
}

fn sequence_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_before_materializing() {
        let node = Node::new(json!([1, 2]));
        assert!(node.is_sequence());
        assert!(!node.is_map());
        assert!(!node.is_materialized());
    }

    #[test]
    fn materialize_is_idempotent() {
        let mut node = Node::new(json!({"a": {"b": 1}}));
        node.materialize();
        let once = node.clone();
        node.materialize();
        assert_eq!(node, once);
        assert!(node.is_map());
        assert!(node.is_materialized());
    }

    #[test]
    fn materialize_wraps_children_lazily() {
        let mut node = Node::new(json!({"a": {"b": 1}, "c": [1]}));
        let map = node.as_map_container().unwrap();
        assert!(!map["a"].is_materialized());
        assert!(map["c"].is_sequence());
    }

    #[test]
    fn scalar_is_not_a_container() {
        let mut node = Node::new(json!(42));
        assert_eq!(
            node.container().err(),
            Some(PatchError::TypeMismatch("number"))
        );
        node.materialize();
        assert_eq!(node, Node::new(json!(42)));
    }

    #[test]
    fn typed_container_mismatch() {
        let mut node = Node::new(json!([1]));
        assert_eq!(
            node.as_map_container().err(),
            Some(PatchError::TypeMismatch("sequence"))
        );
        assert_eq!(node.as_sequence_container().unwrap().len(), 1);
    }

    #[test]
    fn into_value_after_partial_materialization() {
        let doc = json!({"b": [1, {"x": null}], "a": "s"});
        let mut node = Node::new(doc.clone());
        node.as_map_container().unwrap()["b"].materialize();
        assert_eq!(node.into_value(), doc);
    }

    #[test]
    fn serializes_like_the_plain_value() {
        let doc = json!({"z": [true, {"k": "v"}], "a": 1});
        let mut node = Node::new(doc.clone());
        node.materialize();
        assert_eq!(serde_json::to_value(&node).unwrap(), doc);
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            serde_json::to_string(&doc).unwrap()
        );
    }

    #[test]
    fn view_walks_mixed_tree() {
        let mut node = Node::new(json!({"items": [{"name": "a"}, {"name": "b"}]}));
        node.materialize();
        let view = node.view();
        let name = view.get("items").and_then(|v| v.get("1")).and_then(|v| v.get("name"));
        assert_eq!(name.and_then(View::as_str), Some("b"));
        assert!(view.get("items").unwrap().get("2").is_none());
        assert!(view.get("items").unwrap().get("-1").is_none());
    }

    #[test]
    fn view_entries_in_document_order() {
        let node = Node::new(json!({"b": 1, "a": 2}));
        let keys: Vec<String> = node.view().entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert!(Node::new(json!("s")).view().entries().is_empty());
    }
}
