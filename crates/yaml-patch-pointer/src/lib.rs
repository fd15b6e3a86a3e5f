//! Pointers for yaml-patch.
//!
//! Implements [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! escaping and decomposition, plus the `key=value` predicate segment used to
//! address sequence elements by content.
//!
//! # Example
//!
//! ```
//! use yaml_patch_pointer::{format_pointer, parse_pointer, Pointer, Segment};
//!
//! let path = parse_pointer("/foo/a~1b");
//! assert_eq!(path, vec!["foo".to_string(), "a/b".to_string()]);
//! assert_eq!(format_pointer(&path), "/foo/a~1b");
//!
//! let ptr = Pointer::parse("/jobs/name=build/plan").unwrap();
//! assert!(ptr.is_extended());
//! let segments: Vec<Segment> = ptr.segments().collect();
//! assert_eq!(segments[1], Segment::Predicate { key: "name".into(), value: "build".into() });
//! ```

pub mod pointer;
pub mod segment;
pub mod util;
pub mod validate;

pub use pointer::Pointer;
pub use segment::Segment;
pub use util::{escape_component, format_pointer, is_integer, parse_pointer, unescape_component};
pub use validate::{validate_pointer, ValidationError};
