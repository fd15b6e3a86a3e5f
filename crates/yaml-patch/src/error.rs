use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("malformed path {0:?}: must start with '/'")]
    MalformedPath(String),
    #[error("path not found: {0}")]
    PathNotFound(String),
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("invalid index {0:?}")]
    InvalidIndex(String),
    #[error("don't know how to convert value of type {0} into container")]
    TypeMismatch(&'static str),
    #[error("unsupported operation {0:?}")]
    UnsupportedOperation(String),
    #[error("failed to decode: {0}")]
    DecodeFailure(String),
    #[error("failed to encode: {0}")]
    EncodeFailure(String),
    #[error("{op} operation #{index} {}: {source}", describe_target(.path, .from))]
    Operation {
        index: usize,
        op: &'static str,
        path: String,
        from: Option<String>,
        source: Box<PatchError>,
    },
}

impl PatchError {
    /// The underlying failure, with any operation context stripped.
    pub fn root_cause(&self) -> &PatchError {
        match self {
            PatchError::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn describe_target(path: &str, from: &Option<String>) -> String {
    match from {
        Some(from) => format!("from {from:?} to {path:?}"),
        None => format!("at {path:?}"),
    }
}
