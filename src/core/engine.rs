//! The command engine: one filesystem, one current directory, one dispatcher.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::ShellConfig;
use crate::core::archive;
use crate::core::commands::{Command, CommandResult, execute_command};
use crate::core::filesystem::VirtualFs;
use crate::core::parser::{self, parse_input};
use crate::models::OutputLine;

/// Command engine owning the VFS store and the current directory.
///
/// Commands run one at a time to completion; the engine is the single
/// writer of its state.
#[derive(Debug, Default)]
pub struct Engine {
    fs: VirtualFs,
    /// `""` for root, otherwise a directory prefix ending in `/`
    current_dir: String,
    config: ShellConfig,
}

impl Engine {
    /// Create an engine with an empty filesystem.
    pub fn new(config: ShellConfig) -> Self {
        Self::with_fs(config, VirtualFs::empty())
    }

    /// Create an engine over an existing filesystem.
    pub fn with_fs(config: ShellConfig, fs: VirtualFs) -> Self {
        Self {
            fs,
            current_dir: String::new(),
            config,
        }
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut VirtualFs {
        &mut self.fs
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Current directory in directory form (`""` or `"dir/sub/"`).
    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub(crate) fn set_current_dir(&mut self, dir: String) {
        self.current_dir = dir;
    }

    /// Empty the store and return to the root.
    pub(crate) fn reset(&mut self) {
        self.fs.clear();
        self.current_dir.clear();
    }

    /// Load the archive at `path` into the store and report what happened.
    ///
    /// On failure the store is left untouched and the error is reported as
    /// a single line.
    pub fn load_archive(&mut self, path: &Path) -> Vec<OutputLine> {
        match archive::load(path) {
            Ok(loaded) => {
                let mut lines: Vec<OutputLine> =
                    loaded.diagnostics.into_iter().map(OutputLine::info).collect();
                if loaded.entries.is_empty() {
                    return lines;
                }
                let count = loaded.entries.len();
                debug!(
                    keys = ?loaded.entries.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>(),
                    "loaded VFS keys"
                );
                for (key, entry) in loaded.entries {
                    self.fs.put(key, entry);
                }
                lines.push(OutputLine::success(format!(
                    "VFS loaded from {}",
                    path.display()
                )));
                lines.push(OutputLine::info(format!("Files in VFS: {} entries", count)));
                lines
            }
            Err(err) => {
                warn!(error = %err, "failed to load VFS archive");
                vec![OutputLine::error(err.to_string())]
            }
        }
    }

    /// Execute one command line, expanding variables from the process environment.
    pub fn execute(&mut self, line: &str) -> CommandResult {
        self.execute_with(line, parser::process_env)
    }

    /// Execute one command line, expanding variables with `lookup`.
    pub fn execute_with<F>(&mut self, line: &str, lookup: F) -> CommandResult
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(parsed) = parse_input(line, lookup) else {
            return CommandResult::empty();
        };

        debug!(command = %parsed.name, args = ?parsed.args, cwd = %self.current_dir, "dispatch");
        let cmd = Command::parse(&parsed.name, &parsed.args);
        execute_command(cmd, self)
    }
}
