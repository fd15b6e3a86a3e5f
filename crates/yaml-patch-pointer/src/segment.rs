//! Classification of a single raw pointer segment.

use crate::util::unescape_component;

/// One step of a pointer, after escape decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A mapping key or sequence index.
    Literal(String),
    /// A `key=value` predicate matching any descendant mapping whose `key`
    /// holds the string `value`.
    Predicate { key: String, value: String },
}

impl Segment {
    /// Classify a raw (still escaped) segment.
    ///
    /// A segment is a predicate when it contains `=`; it is split at the first
    /// `=` and both halves are unescaped independently.
    ///
    /// # Example
    ///
    /// ```
    /// use yaml_patch_pointer::Segment;
    ///
    /// assert_eq!(Segment::parse("a~1b"), Segment::Literal("a/b".into()));
    /// assert_eq!(
    ///     Segment::parse("name=web"),
    ///     Segment::Predicate { key: "name".into(), value: "web".into() },
    /// );
    /// ```
    pub fn parse(raw: &str) -> Segment {
        match raw.split_once('=') {
            Some((key, value)) => Segment::Predicate {
                key: unescape_component(key),
                value: unescape_component(value),
            },
            None => Segment::Literal(unescape_component(raw)),
        }
    }

    /// Returns true if the raw segment would parse as a predicate.
    pub fn is_predicate_raw(raw: &str) -> bool {
        raw.contains('=')
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self, Segment::Predicate { .. })
    }
}
