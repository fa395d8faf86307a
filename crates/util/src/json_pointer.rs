//! JSON Pointer (RFC 6901) formatting for patch paths.

/// A pointer as its unescaped reference tokens.
pub type Path = Vec<String>;

/// Escapes one reference token: `~` becomes `~0`, `/` becomes `~1`.
///
/// ```
/// use batchspec_util::json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b/c"), "a~0b~1c");
/// assert_eq!(escape_component("plain"), "plain");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains(&['~', '/'][..]) {
        return component.to_string();
    }
    // `~` first, or the `~` of `~1` would be escaped again.
    component.replace('~', "~0").replace('/', "~1")
}

/// Reverses [`escape_component`].
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Formats reference tokens as a pointer string. The root is `""`.
///
/// ```
/// use batchspec_util::json_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["environment".into(), "0".into()]), "/environment/0");
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    path.iter().fold(String::new(), |mut out, component| {
        out.push('/');
        out.push_str(&escape_component(component));
        out
    })
}

/// Splits a pointer string into unescaped reference tokens.
pub fn parse_json_pointer(pointer: &str) -> Path {
    match pointer.strip_prefix('/') {
        Some(rest) => rest.split('/').map(unescape_component).collect(),
        None => Vec::new(),
    }
}
