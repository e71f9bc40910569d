use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use crate::core::glob::Glob;
use crate::core::paths;
use crate::models::VfsEntry;

/// Virtual filesystem stored as a flat map from canonical key to entry.
///
/// There is no tree: hierarchy is derived from the keys on demand.
///
/// # Path Convention
///
/// - Root: empty string `""`, never stored
/// - File: `"a.txt"`, `"dir/b.txt"`
/// - Explicit directory: `"dir/"` (trailing slash)
///
/// A directory exists if its `dir/` key is stored or any key starts with
/// `dir/`. Keys are kept ordered, so prefix queries are range scans.
#[derive(Clone, Debug, Default)]
pub struct VirtualFs {
    entries: BTreeMap<String, VfsEntry>,
}

impl VirtualFs {
    /// Create an empty filesystem.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a filesystem from `(key, entry)` pairs. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, VfsEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get an entry by exact key.
    pub fn get(&self, key: &str) -> Option<&VfsEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut VfsEntry> {
        self.entries.get_mut(key)
    }

    /// Insert or replace an entry.
    pub fn put(&mut self, key: impl Into<String>, entry: VfsEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Iterate over all keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys equal to or starting with `prefix`, in order.
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(key, _)| key.as_str())
            .take_while(move |key| key.starts_with(prefix))
    }

    /// True if any stored key equals or starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.keys_with_prefix(prefix).next().is_some()
    }

    /// Check if a key names a file entry.
    pub fn is_file(&self, key: &str) -> bool {
        self.get(key).is_some_and(VfsEntry::is_file)
    }

    /// Check if a path exists as a directory, explicitly or by inference.
    ///
    /// The root always exists.
    pub fn is_directory(&self, key: &str) -> bool {
        let prefix = paths::dir_prefix(key);
        prefix.is_empty() || self.contains_prefix(&prefix)
    }

    /// Names of the immediate children under a directory prefix.
    ///
    /// `dir_prefix` ends with `/`, or is empty for the root. A key deeper than
    /// one level contributes only its first segment (the child directory).
    pub fn list_children(&self, dir_prefix: &str) -> BTreeSet<String> {
        self.keys_with_prefix(dir_prefix)
            .filter(|key| *key != dir_prefix)
            .filter_map(|key| {
                let rest = &key[dir_prefix.len()..];
                let name = rest.split('/').next().unwrap_or(rest);
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect()
    }

    /// Keys under `dir_prefix` whose final segment matches `glob`.
    ///
    /// The directory key itself is excluded. Results are in key order.
    pub fn find(&self, dir_prefix: &str, glob: &Glob) -> Vec<String> {
        self.keys_with_prefix(dir_prefix)
            .filter(|key| *key != dir_prefix)
            .filter(|key| glob.is_match(paths::file_name(key)))
            .map(str::to_string)
            .collect()
    }

    /// Set the owner on each of `keys`, returning how many entries changed.
    pub fn set_owner<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>, owner: &str) -> usize {
        let mut changed = 0;
        for key in keys {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.set_owner(owner);
                changed += 1;
            }
        }
        changed
    }
}
