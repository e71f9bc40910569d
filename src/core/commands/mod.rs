//! Command parsing and execution.
//!
//! This module provides:
//! - `Command` enum for parsed shell commands
//! - `CommandResult` for command execution results
//! - `execute_command` to run a command against an [`Engine`](crate::core::Engine)
//!
//! # Architecture
//!
//! Input lines are tokenized and expanded by the parser, turned into a
//! `Command` here, then executed. Argument validation happens at execution
//! time so that the "no VFS loaded" check always comes first.

mod execute;
mod result;

pub use execute::execute_command;
pub use result::CommandResult;

use std::fmt;

// =============================================================================
// Path Argument Type
// =============================================================================

/// A path argument passed to a command (e.g., `cd foo`, `touch bar.txt`).
///
/// Stored as typed by the user; resolution against the current directory
/// happens during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArg(String);

impl PathArg {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for PathArg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Command Enum
// =============================================================================

/// Parsed shell command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the current directory. Arguments are ignored.
    Ls,
    Cd(Option<PathArg>),
    Pwd,
    /// Raw arguments; directory-vs-pattern is decided against the store.
    Find(Vec<String>),
    Touch(Option<PathArg>),
    Chown {
        recursive: bool,
        owner: Option<String>,
        path: Option<PathArg>,
    },
    VfsInit,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parse command from name and arguments.
    ///
    /// Names are case-sensitive.
    pub fn parse(name: &str, args: &[String]) -> Self {
        match name {
            "ls" => Self::Ls,
            "cd" => Self::Cd(args.first().map(PathArg::new)),
            "pwd" => Self::Pwd,
            "find" => Self::Find(args.to_vec()),
            "touch" => Self::Touch(args.first().map(PathArg::new)),
            "chown" => {
                let (recursive, operands) = match args.split_first() {
                    Some((flag, rest)) if flag == "-R" => (true, rest),
                    _ => (false, args),
                };
                Self::Chown {
                    recursive,
                    owner: operands.first().cloned(),
                    path: operands.get(1).map(PathArg::new),
                }
            }
            "vfs-init" => Self::VfsInit,
            "exit" => Self::Exit,
            _ => Self::Unknown(name.to_string()),
        }
    }

    /// Whether the command needs a loaded VFS before it can run.
    pub fn requires_vfs(&self) -> bool {
        !matches!(self, Self::VfsInit | Self::Exit | Self::Unknown(_))
    }
}

// =============================================================================
// Tests
// =============================================================================
