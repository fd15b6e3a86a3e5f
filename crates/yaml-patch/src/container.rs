//! Keyed mutation of materialized mappings and sequences.

use tracing::debug;
use yaml_patch_pointer::is_integer;

use crate::error::PatchError;
use crate::node::{Node, NodeMap, NodeSeq};

/// Sequence key meaning "one past the last element" for `add`.
pub const APPEND_KEY: &str = "-";

/// Largest number of nil slots [`Container::set`] will insert to reach an
/// index past the end of a sequence.
pub const MAX_SEQUENCE_GAP: usize = 1 << 16;

/// A mutable, keyed view over a materialized node.
///
/// Mapping keys are taken literally. Sequence keys must be decimal integers;
/// `-` is accepted by [`Container::add`] only.
#[derive(Debug)]
pub enum Container<'a> {
    Map(&'a mut NodeMap),
    Seq(&'a mut NodeSeq),
}

impl<'a> Container<'a> {
    pub fn is_sequence(&self) -> bool {
        matches!(self, Container::Seq(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Container::Map(map) => map.len(),
            Container::Seq(seq) => seq.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The node at `key`.
    ///
    /// A missing mapping key is `Ok(None)`. A sequence index must be in range.
    pub fn get(&self, key: &str) -> Result<Option<&Node>, PatchError> {
        match self {
            Container::Map(map) => Ok(map.get(key)),
            Container::Seq(seq) => {
                let index = existing_index(key, seq.len())?;
                Ok(seq.get(index))
            }
        }
    }

    /// Like [`Container::get`], but hands out the child for the container's
    /// whole lifetime so the resolver can keep descending.
    pub fn into_child(self, key: &str) -> Result<Option<&'a mut Node>, PatchError> {
        match self {
            Container::Map(map) => Ok(map.get_mut(key)),
            Container::Seq(seq) => {
                let index = existing_index(key, seq.len())?;
                Ok(seq.get_mut(index))
            }
        }
    }

    /// Overwrite (or insert) the node at `key`.
    ///
    /// A sequence index past the end grows the sequence, filling the gap with
    /// nil nodes. A gap wider than [`MAX_SEQUENCE_GAP`] is
    /// [`PatchError::IndexOutOfRange`].
    pub fn set(&mut self, key: &str, node: Node) -> Result<(), PatchError> {
        match self {
            Container::Map(map) => {
                map.insert(key.to_string(), node);
            }
            Container::Seq(seq) => {
                let len = seq.len();
                let index = non_negative_index(key, len)?;
                if index >= len {
                    let new_len = index
                        .checked_add(1)
                        .filter(|_| index - len <= MAX_SEQUENCE_GAP)
                        .ok_or(PatchError::IndexOutOfRange {
                            index: i64::try_from(index).unwrap_or(i64::MAX),
                            len,
                        })?;
                    seq.resize_with(new_len, Node::nil);
                }
                seq[index] = node;
            }
        }
        Ok(())
    }

    /// Insert the node at `key`.
    ///
    /// On a mapping this is the same as [`Container::set`]. On a sequence the
    /// elements at and after the index shift right; `-` or an index past the
    /// end appends.
    pub fn add(&mut self, key: &str, node: Node) -> Result<(), PatchError> {
        match self {
            Container::Map(map) => {
                map.insert(key.to_string(), node);
            }
            Container::Seq(seq) => {
                if key == APPEND_KEY {
                    seq.push(node);
                    return Ok(());
                }
                let index = non_negative_index(key, seq.len())?;
                if index > seq.len() {
                    debug!(index, len = seq.len(), "add past end of sequence, appending");
                    seq.push(node);
                } else {
                    seq.insert(index, node);
                }
            }
        }
        Ok(())
    }

    /// Remove and return the node at `key`.
    pub fn remove(&mut self, key: &str) -> Result<Node, PatchError> {
        match self {
            Container::Map(map) => map
                .shift_remove(key)
                .ok_or_else(|| PatchError::KeyNotFound(key.to_string())),
            Container::Seq(seq) => {
                let index = existing_index(key, seq.len())?;
                Ok(seq.remove(index))
            }
        }
    }
}

fn parse_index(key: &str) -> Result<i64, PatchError> {
    if !is_integer(key) {
        return Err(PatchError::InvalidIndex(key.to_string()));
    }
    key.parse()
        .map_err(|_| PatchError::InvalidIndex(key.to_string()))
}

fn non_negative_index(key: &str, len: usize) -> Result<usize, PatchError> {
    let index = parse_index(key)?;
    usize::try_from(index).map_err(|_| PatchError::IndexOutOfRange { index, len })
}

fn existing_index(key: &str, len: usize) -> Result<usize, PatchError> {
    let index = non_negative_index(key, len)?;
    if index >= len {
        return Err(PatchError::IndexOutOfRange {
            index: index as i64,
            len,
        });
    }
    Ok(index)
}
