//! Document and patch text, via `serde_yaml`.
//!
//! YAML is a superset of JSON, so both formats decode through the same path.

use serde_json::Value;

use super::json::from_json_patch;
use super::Format;
use crate::error::PatchError;
use crate::node::Node;
use crate::patch::Patch;

/// Decode document text. Blank text is a null document.
///
/// Mapping keys become strings, so a scalar key such as `200` comes back out
/// as the quoted string `'200'`.
pub fn decode_document(text: &str) -> Result<Value, PatchError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text).map_err(|e| PatchError::DecodeFailure(e.to_string()))
}

/// Decode patch text. Blank text and a null document are empty patches.
pub fn decode_patch(text: &str) -> Result<Patch, PatchError> {
    match decode_document(text)? {
        Value::Null => Ok(Patch::default()),
        records => from_json_patch(&records),
    }
}

/// Encode a (possibly partially materialized) tree.
///
/// JSON output is pretty-printed. Both formats end with a newline.
pub fn encode_document(node: &Node, format: Format) -> Result<String, PatchError> {
    match format {
        Format::Yaml => {
            serde_yaml::to_string(node).map_err(|e| PatchError::EncodeFailure(e.to_string()))
        }
        Format::Json => {
            let mut out = serde_json::to_string_pretty(node)
                .map_err(|e| PatchError::EncodeFailure(e.to_string()))?;
            out.push('\n');
            Ok(out)
        }
    }
}
