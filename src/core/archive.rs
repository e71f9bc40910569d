//! Zip archive loading.
//!
//! Archive members become VFS entries after the longest common directory
//! prefix is stripped from their names, so `root/a.txt` and `root/dir/b.txt`
//! load as `a.txt` and `dir/b.txt`.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, info};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::core::error::ArchiveError;
use crate::core::paths;
use crate::models::{FileContent, VfsEntry};

/// Diagnostic for an archive that yields no entries.
const EMPTY_ARCHIVE_MESSAGE: &str = "Empty VFS archive";

/// Entries and human-readable diagnostics produced by a successful load.
#[derive(Debug, Default)]
pub struct LoadedArchive {
    /// `(key, entry)` pairs in archive order.
    pub entries: Vec<(String, VfsEntry)>,
    /// Messages for the user (common prefix, empty archive).
    pub diagnostics: Vec<String>,
}

/// Load every member of the zip archive at `path`.
///
/// An archive with no members, or whose members all collapse into the
/// common prefix, loads successfully with no entries and an
/// `Empty VFS archive` diagnostic.
pub fn load(path: &Path) -> Result<LoadedArchive, ArchiveError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArchiveError::NotFound(path.to_path_buf()),
        _ => ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| zip_error(path, e))?;

    let mut loaded = LoadedArchive::default();
    if archive.is_empty() {
        loaded.diagnostics.push(EMPTY_ARCHIVE_MESSAGE.to_string());
        return Ok(loaded);
    }

    let prefix = {
        let names: Vec<&str> = archive.file_names().collect();
        common_dir_prefix(&names).to_string()
    };
    loaded
        .diagnostics
        .push(format!("Common prefix: '{}'", prefix));
    debug!(prefix = %prefix, members = archive.len(), "stripping common prefix");

    for index in 0..archive.len() {
        let mut member = archive.by_index(index).map_err(|e| zip_error(path, e))?;
        let Some(key) = member_key(member.name(), &prefix, member.is_dir()) else {
            continue;
        };

        if member.is_dir() {
            loaded.entries.push((key, VfsEntry::directory()));
        } else {
            let mut bytes = Vec::with_capacity(member.size() as usize);
            member
                .read_to_end(&mut bytes)
                .map_err(|source| ArchiveError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            let content = FileContent::from_bytes(bytes);
            loaded.entries.push((key, VfsEntry::file(content)));
        }
    }

    if loaded.entries.is_empty() {
        loaded.diagnostics.push(EMPTY_ARCHIVE_MESSAGE.to_string());
    }

    info!(path = %path.display(), entries = loaded.entries.len(), "archive loaded");
    Ok(loaded)
}

/// Canonical key for an archive member, or `None` if nothing is left once
/// the common prefix is removed.
///
/// Leading, doubled and trailing slashes are collapsed along with `.` and
/// `..` segments. Directory keys get their trailing `/` back.
pub fn member_key(name: &str, prefix: &str, is_dir: bool) -> Option<String> {
    let stripped = name.strip_prefix(prefix).unwrap_or(name);
    let key = paths::normalize(stripped);
    if key.is_empty() {
        None
    } else if is_dir {
        Some(paths::dir_prefix(&key))
    } else {
        Some(key)
    }
}

/// Longest common prefix of `names`, cut back to end on a `/`.
///
/// Returns `""` when the names share no complete leading directory.
pub fn common_dir_prefix<'a>(names: &[&'a str]) -> &'a str {
    let Some((first, rest)) = names.split_first() else {
        return "";
    };

    let mut len = first.len();
    for name in rest {
        len = first
            .char_indices()
            .zip(name.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, c), _)| i + c.len_utf8())
            .unwrap_or(0)
            .min(len);
    }

    let common = &first[..len];
    if common.ends_with('/') {
        return common;
    }
    match common.rfind('/') {
        Some(i) => &first[..=i],
        None => "",
    }
}

fn zip_error(path: &Path, err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(source) if source.kind() != io::ErrorKind::UnexpectedEof => {
            ArchiveError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
        other => ArchiveError::InvalidFormat {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix_strips_root_dir() {
        assert_eq!(common_dir_prefix(&["root/a.txt", "root/dir/b.txt"]), "root/");
    }

    #[test]
    fn test_common_prefix_never_splits_segment() {
        assert_eq!(common_dir_prefix(&["proj/alpha.txt", "proj/alps.txt"]), "proj/");
        assert_eq!(common_dir_prefix(&["abc.txt", "abd.txt"]), "");
    }

    #[test]
    fn test_common_prefix_with_directory_member() {
        assert_eq!(
            common_dir_prefix(&["root/", "root/a.txt", "root/dir/", "root/dir/b.txt"]),
            "root/"
        );
    }

    #[test]
    fn test_common_prefix_single_member() {
        assert_eq!(common_dir_prefix(&["root/sub/a.txt"]), "root/sub/");
        assert_eq!(common_dir_prefix(&["a.txt"]), "");
    }

    #[test]
    fn test_common_prefix_no_shared_root() {
        assert_eq!(common_dir_prefix(&["a/x.txt", "b/y.txt"]), "");
        assert_eq!(common_dir_prefix(&[]), "");
    }

    #[test]
    fn test_common_prefix_multibyte() {
        assert_eq!(common_dir_prefix(&["данные/а.txt", "данные/б.txt"]), "данные/");
    }

    #[test]
    fn test_member_key_strips_prefix() {
        assert_eq!(member_key("root/a.txt", "root/", false).as_deref(), Some("a.txt"));
        assert_eq!(member_key("root/dir", "root/", true).as_deref(), Some("dir/"));
        assert_eq!(member_key("root/dir/", "root/", true).as_deref(), Some("dir/"));
        assert_eq!(member_key("root/", "root/", true), None);
    }

    #[test]
    fn test_member_key_is_canonical() {
        assert_eq!(member_key("/etc/x.txt", "", false).as_deref(), Some("etc/x.txt"));
        assert_eq!(member_key("a//b", "", false).as_deref(), Some("a/b"));
        assert_eq!(member_key("./a/../b.txt", "", false).as_deref(), Some("b.txt"));
        assert_eq!(member_key("/", "", true), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/definitely/not/here.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(_)));
    }
}
