/// Unescapes a pointer path component.
///
/// `~1` is replaced with `/` before `~0` is replaced with `~`, so `~01`
/// decodes to `~1` rather than `/`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer path component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a pointer string into unescaped path components.
///
/// The empty string yields no components. The first character is assumed to
/// be the leading `/` and is dropped.
pub fn parse_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_component).collect()
}

/// Format unescaped path components into a pointer string.
pub fn format_pointer<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component.as_ref()));
    }
    out
}

/// Check if a string consists of an optional `-` sign followed by ASCII
/// digits.
pub fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
