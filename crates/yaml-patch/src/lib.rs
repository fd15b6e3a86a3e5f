//! RFC 6902 style patching of YAML and JSON documents.
//!
//! A [`Patch`] is an ordered list of [`Op`]s (`add`, `remove`, `replace`,
//! `move`, `copy`) addressed by RFC 6901 pointers. Pointer segments of the
//! form `key=value` select every mapping, at any depth below the current
//! position, whose `key` is the string `value`:
//!
//! ```
//! use serde_json::json;
//! use yaml_patch::codec::yaml::decode_patch;
//!
//! let patch = decode_patch(
//!     "- op: replace\n  path: /jobs/name=build/serial\n  value: true\n",
//! )
//! .unwrap();
//! let doc = patch
//!     .apply(json!({"jobs": [{"name": "test"}, {"name": "build", "serial": false}]}))
//!     .unwrap();
//! assert_eq!(doc["jobs"][1]["serial"], json!(true));
//! ```
//!
//! Documents are held as lazily materialized [`Node`]s; a subtree is only
//! converted into a mutable [`Container`] once an operation walks into it.

pub mod apply;
pub mod cli;
pub mod codec;
pub mod container;
pub mod error;
pub mod expand;
pub mod node;
pub mod patch;
pub mod resolve;
pub mod types;

pub use apply::{apply_op, apply_ops};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use codec::Format;
pub use container::{Container, APPEND_KEY, MAX_SEQUENCE_GAP};
pub use error::PatchError;
pub use expand::expand;
pub use node::{Node, NodeMap, NodeSeq, View};
pub use patch::Patch;
pub use resolve::{is_extended_path, parse_path, resolve};
pub use types::{ApplyOptions, Op};
