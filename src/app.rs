//! Session state shared with the host.
//!
//! A [`Session`] owns one [`Engine`] plus the command history the host
//! uses for up/down recall. The host feeds it trimmed lines and renders the
//! returned output.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::config::{MAX_COMMAND_HISTORY, PROMPT_MARKER, ShellConfig, WELCOME_MESSAGE};
use crate::core::error::ScriptError;
use crate::core::{CommandResult, Engine, paths};
use crate::models::OutputLine;

// ============================================================================
// Session
// ============================================================================

/// One interactive shell session.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    /// Command history for up/down navigation.
    command_history: Vec<String>,
    /// Current position in command history (for navigation).
    history_index: Option<usize>,
}

impl Session {
    /// Creates a session with an empty filesystem.
    pub fn new(config: ShellConfig) -> Self {
        Self::with_engine(Engine::new(config))
    }

    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            command_history: Vec::new(),
            history_index: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Banner lines describing the session configuration.
    pub fn welcome(&self) -> Vec<OutputLine> {
        let config = self.engine.config();
        let describe = |p: Option<&Path>| {
            p.map(|p| p.display().to_string())
                .unwrap_or_else(|| "None".to_string())
        };
        vec![
            OutputLine::info(WELCOME_MESSAGE),
            OutputLine::info(format!("VFS path: {}", describe(config.vfs_path.as_deref()))),
            OutputLine::info(format!(
                "Startup script: {}",
                describe(config.startup_script.as_deref())
            )),
        ]
    }

    /// Load the configured archive, if any.
    pub fn load_configured_archive(&mut self) -> Vec<OutputLine> {
        match self.engine.config().vfs_path.clone() {
            Some(path) => self.engine.load_archive(&path),
            None => Vec::new(),
        }
    }

    /// Gets the prompt shown before interactive input.
    ///
    /// Format: `{user}@{hostname}:{pwd}> `
    pub fn prompt(&self) -> String {
        let config = self.engine.config();
        format!(
            "{}@{}:{}{}",
            config.user,
            config.hostname,
            paths::display(self.engine.current_dir()),
            PROMPT_MARKER
        )
    }

    /// Submit an interactive line: record it in history, echo it, execute it.
    ///
    /// Blank lines are ignored.
    pub fn submit(&mut self, line: &str) -> CommandResult {
        let line = line.trim();
        if line.is_empty() {
            return CommandResult::empty();
        }

        self.add_to_command_history(line);
        self.run_line(line)
    }

    /// Echo and execute a line without touching history.
    fn run_line(&mut self, line: &str) -> CommandResult {
        let mut result = self.engine.execute(line);
        result.output.insert(0, OutputLine::command(PROMPT_MARKER, line));
        result
    }

    /// Run a startup script line by line.
    ///
    /// Blank lines and lines starting with `#` are skipped. An `exit` stops
    /// the script and is reported through the returned result. If the file
    /// cannot be read, a single diagnostic line is returned.
    pub fn run_script(&mut self, path: &Path) -> CommandResult {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(source) => {
                let err = ScriptError::ReadFailure {
                    path: path.to_path_buf(),
                    source,
                };
                warn!(error = %err, "startup script failed");
                return CommandResult::line(OutputLine::error(err.to_string()));
            }
        };

        let mut combined = CommandResult::empty();
        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let result = self.run_line(line);
            combined.output.extend(result.output);
            if result.exit {
                combined.exit = true;
                break;
            }
        }
        combined
    }

    /// Run the configured startup script, if any.
    pub fn run_configured_script(&mut self) -> CommandResult {
        match self.engine.config().startup_script.clone() {
            Some(path) => self.run_script(&path),
            None => CommandResult::empty(),
        }
    }

    // ------------------------------------------------------------------------
    // Command history
    // ------------------------------------------------------------------------

    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    pub fn add_to_command_history(&mut self, cmd: &str) {
        if !cmd.trim().is_empty() && self.command_history.last().map(String::as_str) != Some(cmd) {
            self.command_history.push(cmd.to_string());
            if self.command_history.len() > MAX_COMMAND_HISTORY {
                self.command_history.remove(0);
            }
        }
        self.history_index = None;
    }

    /// Move through history: negative `direction` goes back (up), positive
    /// goes forward (down). Returns the recalled line, or `None` once the
    /// cursor moves past the newest entry.
    pub fn navigate_history(&mut self, direction: i32) -> Option<String> {
        let history = &self.command_history;
        if history.is_empty() {
            return None;
        }

        let new_index = match self.history_index {
            None if direction < 0 => Some(history.len() - 1),
            Some(i) if direction < 0 && i > 0 => Some(i - 1),
            Some(i) if direction > 0 && i < history.len() - 1 => Some(i + 1),
            Some(_) if direction > 0 => None,
            current => current,
        };

        self.history_index = new_index;
        new_index.map(|i| history[i].clone())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}
