use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};

// =============================================================================
// File Content
// =============================================================================

/// Content of a file entry.
///
/// Text files keep their decoded UTF-8 content. Binary files keep a base64
/// rendering of the raw bytes so the content stays printable; [`FileContent::to_bytes`]
/// restores the original byte sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileContent {
    data: String,
    is_binary: bool,
}

impl FileContent {
    /// Empty text content, as created by `touch`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Classify raw bytes: valid UTF-8 is stored as text, anything else as base64.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self {
                data: text,
                is_binary: false,
            },
            Err(err) => Self {
                data: STANDARD.encode(err.into_bytes()),
                is_binary: true,
            },
        }
    }

    /// Printable form: the text itself, or base64 for binary content.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    /// Decode back into the original bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        if self.is_binary {
            STANDARD.decode(&self.data)
        } else {
            Ok(self.data.as_bytes().to_vec())
        }
    }
}

// =============================================================================
// VFS Entry
// =============================================================================

/// An entry stored under a canonical key in the virtual filesystem.
///
/// Directory keys end with `/`. Most directories are never stored at all and
/// only exist because some key starts with their prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VfsEntry {
    Directory {
        owner: Option<String>,
    },
    File {
        content: FileContent,
        owner: Option<String>,
        mtime: Option<DateTime<Utc>>,
    },
}

impl VfsEntry {
    /// Explicit directory with no owner recorded.
    pub fn directory() -> Self {
        VfsEntry::Directory { owner: None }
    }

    /// File loaded from an archive: no owner, no timestamp.
    pub fn file(content: FileContent) -> Self {
        VfsEntry::File {
            content,
            owner: None,
            mtime: None,
        }
    }

    /// Fresh empty text file owned by `owner` and stamped with `mtime`.
    pub fn new_file(owner: &str, mtime: DateTime<Utc>) -> Self {
        VfsEntry::File {
            content: FileContent::empty(),
            owner: Some(owner.to_string()),
            mtime: Some(mtime),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, VfsEntry::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, VfsEntry::File { .. })
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            VfsEntry::Directory { owner } | VfsEntry::File { owner, .. } => owner.as_deref(),
        }
    }

    pub fn set_owner(&mut self, new_owner: &str) {
        match self {
            VfsEntry::Directory { owner } | VfsEntry::File { owner, .. } => {
                *owner = Some(new_owner.to_string());
            }
        }
    }

    /// File content (files only).
    pub fn content(&self) -> Option<&FileContent> {
        match self {
            VfsEntry::File { content, .. } => Some(content),
            VfsEntry::Directory { .. } => None,
        }
    }

    /// Modification time (files only).
    pub fn mtime(&self) -> Option<DateTime<Utc>> {
        match self {
            VfsEntry::File { mtime, .. } => *mtime,
            VfsEntry::Directory { .. } => None,
        }
    }

    /// Modification time as ISO-8601 with a `Z` suffix, e.g. `2024-01-02T03:04:05Z`.
    pub fn mtime_iso(&self) -> Option<String> {
        self.mtime()
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Update the modification time. No-op on directories.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if let VfsEntry::File { mtime, .. } = self {
            *mtime = Some(now);
        }
    }
}
