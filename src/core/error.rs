//! Error types for the shell engine.
//!
//! Every error is recovered locally and rendered as a single output line:
//!
//! - [`ShellError`] - Command precondition and lookup failures
//! - [`ArchiveError`] - Failures opening or decoding the backing archive
//! - [`ScriptError`] - Failures reading a startup script

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::NO_VFS_MESSAGE;

/// Errors raised while executing a command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The store is empty.
    #[error("{}", NO_VFS_MESSAGE)]
    NoVfsLoaded,

    /// A required operand was not supplied.
    #[error("{command}: {message}")]
    MissingArgument {
        command: &'static str,
        message: &'static str,
    },

    /// The path does not name an existing directory.
    #[error("{command}: {path}: No such directory in VFS")]
    DirectoryNotFound { command: &'static str, path: String },

    #[error("{command}: cannot access '{path}': No such file or directory")]
    PathNotFound { command: &'static str, path: String },

    /// The parent directory of a path to be created does not exist.
    #[error("{command}: cannot {action} '{path}': No such directory in VFS")]
    ParentNotFound {
        command: &'static str,
        action: &'static str,
        path: String,
    },

    /// A file operation targeted a directory.
    #[error("{command}: cannot {action} '{path}': {reason}")]
    TypeConflict {
        command: &'static str,
        action: &'static str,
        path: String,
        reason: &'static str,
    },

    /// `find` received a glob that cannot be compiled.
    #[error("find: invalid pattern '{pattern}'")]
    InvalidPattern { pattern: String },

    /// A host filesystem operation failed (e.g. removing the backing archive).
    #[error("{context}: {source}")]
    HostIo {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    pub fn missing(command: &'static str, message: &'static str) -> Self {
        Self::MissingArgument { command, message }
    }
}

/// Errors raised while loading the backing archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Error: VFS file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error: Invalid ZIP format: {}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Error: failed to read VFS archive {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while running a startup script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Error executing script: {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
