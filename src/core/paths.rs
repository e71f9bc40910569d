//! Path resolution for canonical VFS keys.
//!
//! # Key Convention
//!
//! - Root: empty string `""`
//! - File in root: `"a.txt"`
//! - Nested entry: `"dir/b.txt"`
//! - No leading slash; a trailing slash marks a directory key (`"dir/"`)
//!
//! The current directory is stored in directory form: `""` for root,
//! otherwise with a trailing slash (`"dir/sub/"`).

/// Resolve a user-supplied path token against the current directory.
///
/// - `.`, `./` and the empty token resolve to the current directory
/// - A leading `/` makes the token absolute
/// - Anything else is appended to the current directory
///
/// `..` above the root clamps to the root instead of failing.
pub fn resolve(token: &str, current_dir: &str) -> String {
    if token.is_empty() || token == "." || token == "./" {
        return current_dir.trim_end_matches('/').to_string();
    }

    if let Some(absolute) = token.strip_prefix('/') {
        return normalize(absolute);
    }

    let combined = if current_dir.is_empty() {
        token.to_string()
    } else if current_dir.ends_with('/') {
        format!("{}{}", current_dir, token)
    } else {
        format!("{}/{}", current_dir, token)
    };

    normalize(&combined)
}

/// Normalize a path by resolving `.` and `..` components.
///
/// Returns a key with no leading or trailing slashes.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/').filter(|s| !s.is_empty()) {
        match part {
            ".." => {
                parts.pop();
            }
            "." => {}
            _ => parts.push(part),
        }
    }

    parts.join("/")
}

/// Directory prefix for a key: `""` for root, otherwise `key/`.
pub fn dir_prefix(key: &str) -> String {
    let trimmed = key.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Everything before the last `/`; the root for single-segment keys.
pub fn parent(key: &str) -> &str {
    key.trim_end_matches('/')
        .rsplit_once('/')
        .map(|(parent, _)| parent)
        .unwrap_or("")
}

/// Final path segment of a key, ignoring a trailing slash.
pub fn file_name(key: &str) -> &str {
    let trimmed = key.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Absolute display form: `/` for root, otherwise `/` plus the key without
/// surrounding slashes.
pub fn display(key: &str) -> String {
    let trimmed = key.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}
