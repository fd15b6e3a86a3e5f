//! Patch records as `serde_json::Value`.
//!
//! A record is a mapping `{op, path, from, value}` in RFC 6902 form. Records
//! decoded from YAML arrive here too, since YAML patch files are decoded into
//! the same tree type first.

use serde_json::{json, Map, Value};

use crate::error::PatchError;
use crate::patch::Patch;
use crate::types::Op;

// ── Field helpers ─────────────────────────────────────────────────────────

fn decode_string(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, PatchError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(PatchError::DecodeFailure(format!(
            "'{key}' must be a string, got {other}"
        ))),
    }
}

fn decode_from(obj: &Map<String, Value>, op: &str) -> Result<String, PatchError> {
    decode_string(obj, "from")?
        .ok_or_else(|| PatchError::DecodeFailure(format!("{op} requires 'from'")))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to its record form.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({"op": "add", "path": path, "value": value}),
        Op::Remove { path } => json!({"op": "remove", "path": path}),
        Op::Replace { path, value } => json!({"op": "replace", "path": path, "value": value}),
        Op::Move { path, from } => json!({"op": "move", "from": from, "path": path}),
        Op::Copy { path, from } => json!({"op": "copy", "from": from, "path": path}),
    }
}

/// Serialize a whole patch to a sequence of records.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Decode one record.
///
/// A missing `path` decodes as the empty string and a missing `value` as
/// null; both surface when the operation is applied rather than here.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::DecodeFailure("operation must be a mapping".into()))?;
    let op_str = match obj.get("op") {
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(PatchError::DecodeFailure(format!(
                "'op' must be a string, got {other}"
            )))
        }
        None => return Err(PatchError::DecodeFailure("missing 'op' field".into())),
    };

    let path = decode_string(obj, "path")?.unwrap_or_default();
    let value = || obj.get("value").cloned().unwrap_or(Value::Null);

    match op_str {
        "add" => Ok(Op::Add {
            path,
            value: value(),
        }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace {
            path,
            value: value(),
        }),
        "move" => Ok(Op::Move {
            path,
            from: decode_from(obj, op_str)?,
        }),
        "copy" => Ok(Op::Copy {
            path,
            from: decode_from(obj, op_str)?,
        }),
        other => Err(PatchError::UnsupportedOperation(other.to_string())),
    }
}

/// Decode a sequence of records.
pub fn from_json_patch(v: &Value) -> Result<Patch, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::DecodeFailure("patch must be a sequence".into()))?;
    arr.iter().map(from_json).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_kind() {
        let patch = from_json_patch(&json!([
            {"op": "add", "path": "/a", "value": 1},
            {"op": "remove", "path": "/b"},
            {"op": "replace", "path": "/c", "value": {"x": [1]}},
            {"op": "move", "from": "/d", "path": "/e"},
            {"op": "copy", "from": "/f", "path": "/g"},
        ]))
        .unwrap();
        let names: Vec<&str> = patch.iter().map(Op::op_name).collect();
        assert_eq!(names, vec!["add", "remove", "replace", "move", "copy"]);
        assert_eq!(patch[3].from(), Some("/d"));
        assert_eq!(patch[2].value(), Some(&json!({"x": [1]})));
    }

    #[test]
    fn encodes_back_to_records() {
        let records = json!([
            {"op": "add", "path": "/a", "value": null},
            {"op": "copy", "from": "/f", "path": "/g"},
        ]);
        let patch = from_json_patch(&records).unwrap();
        assert_eq!(to_json_patch(&patch), records);
    }

    #[test]
    fn missing_fields_default() {
        let op = from_json(&json!({"op": "add", "value": 1})).unwrap();
        assert_eq!(op.path(), "");
        let op = from_json(&json!({"op": "replace", "path": "/a"})).unwrap();
        assert_eq!(op.value(), Some(&Value::Null));
    }

    #[test]
    fn move_and_copy_require_from() {
        for op in ["move", "copy"] {
            assert_eq!(
                from_json(&json!({"op": op, "path": "/a"})),
                Err(PatchError::DecodeFailure(format!("{op} requires 'from'")))
            );
        }
    }

    #[test]
    fn unknown_op() {
        assert_eq!(
            from_json(&json!({"op": "test", "path": "/a", "value": 1})),
            Err(PatchError::UnsupportedOperation("test".into()))
        );
    }

    #[test]
    fn malformed_records() {
        assert!(matches!(
            from_json(&json!("add")),
            Err(PatchError::DecodeFailure(_))
        ));
        assert!(matches!(
            from_json(&json!({"path": "/a"})),
            Err(PatchError::DecodeFailure(_))
        ));
        assert!(matches!(
            from_json(&json!({"op": 1})),
            Err(PatchError::DecodeFailure(_))
        ));
        assert!(matches!(
            from_json(&json!({"op": "remove", "path": 3})),
            Err(PatchError::DecodeFailure(_))
        ));
        assert!(matches!(
            from_json_patch(&json!({"op": "remove"})),
            Err(PatchError::DecodeFailure(_))
        ));
    }
}
