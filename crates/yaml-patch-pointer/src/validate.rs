//! Validation functions for pointers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pointer {0:?} must start with '/'")]
    PointerInvalid(String),
}

/// Validate a pointer string.
///
/// Unlike a bare RFC 6901 pointer, the empty string is rejected: every
/// operation must name a key inside some container.
///
/// # Errors
///
/// [`ValidationError::PointerInvalid`] if the pointer doesn't start with `/`.
/// Length is not limited.
///
/// # Example
///
/// ```
/// use yaml_patch_pointer::validate_pointer;
///
/// validate_pointer("/foo/bar").unwrap();
/// validate_pointer("/").unwrap();
/// validate_pointer("").unwrap_err();
/// validate_pointer("foo").unwrap_err();
/// ```
pub fn validate_pointer(pointer: &str) -> Result<(), ValidationError> {
    if !pointer.starts_with('/') {
        return Err(ValidationError::PointerInvalid(pointer.to_string()));
    }
    Ok(())
}
