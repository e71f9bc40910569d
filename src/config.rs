//! Application configuration.
//!
//! Centralizes the constants used throughout the shell and the
//! [`ShellConfig`] assembled by the host at startup.

use std::env;
use std::path::PathBuf;

// =============================================================================
// Application Metadata
// =============================================================================

/// Banner line printed when the host starts.
pub const WELCOME_MESSAGE: &str = "Welcome to the Shell Emulator!";

/// Marker printed before echoed and interactive input lines.
pub const PROMPT_MARKER: &str = "> ";

// =============================================================================
// Messages
// =============================================================================

/// Guidance shown by every filesystem command while the store is empty.
pub const NO_VFS_MESSAGE: &str =
    "No VFS loaded. Use 'vfs-init' to initialize or provide VFS path at startup.";

/// Shown by `ls` when the current directory has no children.
pub const EMPTY_DIRECTORY_MESSAGE: &str = "(empty directory)";

/// Shown by `find` when nothing matches.
pub const NO_MATCHES_MESSAGE: &str = "(no matches)";

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Maximum number of command history entries to keep.
pub const MAX_COMMAND_HISTORY: usize = 100;

/// Glob used by `find` when no pattern is given.
pub const DEFAULT_FIND_PATTERN: &str = "*";

// =============================================================================
// Environment
// =============================================================================

/// Variables consulted, in order, for the invoking user name.
pub const USER_ENV_VARS: &[&str] = &["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Fallback user name when none of [`USER_ENV_VARS`] is set.
pub const DEFAULT_USER: &str = "user";

/// Fallback host name when `HOSTNAME` is unset.
pub const DEFAULT_HOSTNAME: &str = "localhost";

// =============================================================================
// ShellConfig
// =============================================================================

/// Startup configuration for one shell session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellConfig {
    /// Zip archive backing the VFS (also deleted by `vfs-init`).
    pub vfs_path: Option<PathBuf>,
    /// Script executed line by line after the archive is loaded.
    pub startup_script: Option<PathBuf>,
    /// Owner stamped on files created with `touch`.
    pub user: String,
    /// Host name shown in the prompt.
    pub hostname: String,
}

impl ShellConfig {
    /// Build a configuration, taking user and host names from the process environment.
    pub fn new(vfs_path: Option<PathBuf>, startup_script: Option<PathBuf>) -> Self {
        Self {
            vfs_path,
            startup_script,
            user: invoking_user(),
            hostname: env::var("HOSTNAME")
                .ok()
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string()),
        }
    }

    /// Override the invoking user.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Name of the user running the shell.
pub fn invoking_user() -> String {
    USER_ENV_VARS
        .iter()
        .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_USER.to_string())
}
