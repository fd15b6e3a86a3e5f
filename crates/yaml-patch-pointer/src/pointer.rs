//! The [`Pointer`] value type.

use std::fmt;
use std::str::FromStr;

use crate::segment::Segment;
use crate::util::{format_pointer, unescape_component};
use crate::validate::{validate_pointer, ValidationError};

/// A validated pointer string such as `/spec/containers/name=web/image`.
///
/// The raw text is kept as written. Segments are unescaped only when they are
/// consumed, so a `~1` inside a segment never acts as a delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pointer {
    raw: String,
}

impl Pointer {
    /// Parse and validate a pointer.
    ///
    /// # Example
    ///
    /// ```
    /// use yaml_patch_pointer::Pointer;
    ///
    /// let ptr = Pointer::parse("/foo/a~1b").unwrap();
    /// assert_eq!(ptr.components(), vec!["foo", "a/b"]);
    /// assert!(Pointer::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        validate_pointer(raw)?;
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Build a pointer from unescaped components, escaping each one.
    ///
    /// An empty component list yields the empty string, which [`Pointer::parse`]
    /// would reject.
    pub fn from_components<S: AsRef<str>>(components: &[S]) -> Self {
        Self {
            raw: format_pointer(components),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Raw (escaped) segments, in order.
    pub fn raw_segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.raw[1..].split('/')
    }

    /// Split into the raw intermediate segments and the raw final key.
    ///
    /// # Example
    ///
    /// ```
    /// use yaml_patch_pointer::Pointer;
    ///
    /// let ptr = Pointer::parse("/a/b~1c/d").unwrap();
    /// assert_eq!(ptr.decompose(), (vec!["a", "b~1c"], "d"));
    ///
    /// let ptr = Pointer::parse("/").unwrap();
    /// assert_eq!(ptr.decompose(), (vec![], ""));
    /// ```
    pub fn decompose(&self) -> (Vec<&str>, &str) {
        let body = &self.raw[1..];
        match body.rsplit_once('/') {
            Some((parents, last)) => (parents.split('/').collect(), last),
            None => (Vec::new(), body),
        }
    }

    /// Unescaped components.
    pub fn components(&self) -> Vec<String> {
        self.raw_segments().map(unescape_component).collect()
    }

    /// Classified segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.raw_segments().map(Segment::parse)
    }

    /// Returns true if any segment is a `key=value` predicate.
    pub fn is_extended(&self) -> bool {
        self.raw_segments().any(Segment::is_predicate_raw)
    }
}

impl FromStr for Pointer {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Pointer {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
