//! Locating the container that holds a pointer's final key.

use yaml_patch_pointer::{unescape_component, Pointer, ValidationError};

use crate::container::Container;
use crate::error::PatchError;
use crate::node::Node;

/// Parse a raw operation path into a [`Pointer`].
pub fn parse_path(path: &str) -> Result<Pointer, PatchError> {
    Pointer::parse(path).map_err(|err| match err {
        ValidationError::PointerInvalid(raw) => PatchError::MalformedPath(raw),
    })
}

/// Returns true if `path` is a well-formed pointer with a `key=value`
/// segment.
pub fn is_extended_path(path: &str) -> bool {
    Pointer::parse(path).is_ok_and(|pointer| pointer.is_extended())
}

/// Walk every segment but the last, returning the container that holds the
/// final key together with the unescaped key.
///
/// Every intermediate segment must name an existing mapping or sequence; the
/// final key itself need not exist.
///
/// # Errors
///
/// - [`PatchError::MalformedPath`] if `path` does not start with `/`
/// - [`PatchError::TypeMismatch`] if `root` is a scalar
/// - [`PatchError::PathNotFound`] if an intermediate segment is missing or
///   is not a container
pub fn resolve<'a>(root: &'a mut Node, path: &str) -> Result<(Container<'a>, String), PatchError> {
    let pointer = parse_path(path)?;
    let (parents, key) = pointer.decompose();
    let not_found = || PatchError::PathNotFound(path.to_string());

    let mut container = root.container()?;
    for segment in parents {
        let child = container
            .into_child(&unescape_component(segment))
            .ok()
            .flatten()
            .ok_or_else(not_found)?;
        container = child.container().map_err(|_| not_found())?;
    }
    Ok((container, unescape_component(key)))
}
