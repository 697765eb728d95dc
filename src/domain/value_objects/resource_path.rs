//! Logical resource paths
//!
//! Resource paths are `/`-separated and relative to their root. The empty
//! string names the root directory. They are plain strings, so renames never
//! propagate into them automatically; `rebase` is how callers catch up.

/// Join a parent path and a child name
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Parent path, empty for top-level entries and the root itself
pub fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(index) => path[..index].to_string(),
        None => String::new(),
    }
}

/// Last path component
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// True if `path` equals `prefix` or lies below it
pub fn is_same_or_descendant(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Replace the `old_prefix` part of `path` with `new_prefix`.
///
/// Returns `None` when `path` is not `old_prefix` or one of its descendants.
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if !is_same_or_descendant(path, old_prefix) {
        return None;
    }
    let suffix = path[old_prefix.len()..].trim_start_matches('/');
    Some(join(new_prefix, suffix).trim_end_matches('/').to_string())
}

/// Normalize user input: backslashes become slashes, empty and `.`
/// components are dropped.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
