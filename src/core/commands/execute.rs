//! Command execution logic.
//!
//! Contains the `execute_command` function that runs parsed commands
//! against the engine's filesystem and current directory.

use std::fs;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_FIND_PATTERN, EMPTY_DIRECTORY_MESSAGE, NO_MATCHES_MESSAGE};
use crate::core::Engine;
use crate::core::error::ShellError;
use crate::core::glob::Glob;
use crate::core::paths;
use crate::models::{OutputLine, VfsEntry};

use super::{Command, CommandResult, PathArg};

/// Execute a parsed command and return its output.
///
/// Preconditions are checked before any mutation, so a failing command
/// leaves the engine unchanged. Failures become a single error line.
pub fn execute_command(cmd: Command, engine: &mut Engine) -> CommandResult {
    if cmd.requires_vfs() && engine.fs().is_empty() {
        return error_result(ShellError::NoVfsLoaded);
    }

    let result = match cmd {
        Command::Ls => execute_ls(engine),
        Command::Cd(path) => execute_cd(path, engine),
        Command::Pwd => Ok(CommandResult::line(OutputLine::text(paths::display(
            engine.current_dir(),
        )))),
        Command::Find(args) => execute_find(&args, engine),
        Command::Touch(path) => execute_touch(path, engine),
        Command::Chown {
            recursive,
            owner,
            path,
        } => execute_chown(recursive, owner, path, engine),
        Command::VfsInit => Ok(execute_vfs_init(engine)),
        Command::Exit => Ok(CommandResult::exit()),
        Command::Unknown(name) => Ok(CommandResult::line(OutputLine::error(format!(
            "Command not found: {}",
            name
        )))),
    };

    result.unwrap_or_else(error_result)
}

fn error_result(err: ShellError) -> CommandResult {
    debug!(error = %err, "command failed");
    CommandResult::line(OutputLine::error(err.to_string()))
}

/// Execute `ls`: immediate children of the current directory.
fn execute_ls(engine: &Engine) -> Result<CommandResult, ShellError> {
    let children: Vec<String> = engine
        .fs()
        .list_children(engine.current_dir())
        .into_iter()
        .collect();

    let line = if children.is_empty() {
        OutputLine::text(EMPTY_DIRECTORY_MESSAGE)
    } else {
        OutputLine::text(children.join(" "))
    };
    Ok(CommandResult::line(line))
}

/// Execute `cd`.
///
/// Succeeds when the target is the root, an exact stored key, or a prefix
/// of some stored key.
fn execute_cd(path: Option<PathArg>, engine: &mut Engine) -> Result<CommandResult, ShellError> {
    let path = path.ok_or(ShellError::missing("cd", "missing argument"))?;
    let target = paths::resolve(path.as_str(), engine.current_dir());
    let candidate = paths::dir_prefix(&target);

    let fs = engine.fs();
    let exists = candidate.is_empty() || fs.get(&target).is_some() || fs.contains_prefix(&candidate);
    if !exists {
        return Err(ShellError::DirectoryNotFound {
            command: "cd",
            path: path.to_string(),
        });
    }

    engine.set_current_dir(candidate);
    Ok(CommandResult::line(OutputLine::text(format!(
        "Changed VFS directory to /{}",
        engine.current_dir()
    ))))
}

/// Tokens that always name a directory for `find`.
fn is_dot_or_root(token: &str) -> bool {
    matches!(token, "/" | "." | "./")
}

/// Execute `find [dir] [pattern]`.
///
/// A single argument is a search root if it names an existing directory,
/// otherwise a pattern applied to the current directory.
fn execute_find(args: &[String], engine: &Engine) -> Result<CommandResult, ShellError> {
    let fs = engine.fs();
    let cwd = engine.current_dir();
    let here = paths::resolve(".", cwd);

    let (root, pattern) = match args {
        [] => (here, DEFAULT_FIND_PATTERN),
        [only] => {
            let candidate = paths::resolve(only, cwd);
            if is_dot_or_root(only) || fs.is_directory(&candidate) {
                (candidate, DEFAULT_FIND_PATTERN)
            } else {
                (here, only.as_str())
            }
        }
        [dir, pattern, ..] => {
            let root = paths::resolve(dir, cwd);
            if !is_dot_or_root(dir) && !fs.is_directory(&root) {
                return Err(ShellError::DirectoryNotFound {
                    command: "find",
                    path: dir.clone(),
                });
            }
            (root, pattern.as_str())
        }
    };

    let glob = Glob::new(pattern).map_err(|e| {
        debug!(pattern, error = %e, "glob did not compile");
        ShellError::InvalidPattern {
            pattern: pattern.to_string(),
        }
    })?;

    let matches = fs.find(&paths::dir_prefix(&root), &glob);
    if matches.is_empty() {
        return Ok(CommandResult::line(OutputLine::text(NO_MATCHES_MESSAGE)));
    }

    Ok(CommandResult::output(
        matches
            .into_iter()
            .map(|key| OutputLine::text(format!("/{}", key)))
            .collect(),
    ))
}

/// Execute `touch`: create an empty file or refresh its modification time.
fn execute_touch(path: Option<PathArg>, engine: &mut Engine) -> Result<CommandResult, ShellError> {
    let path = path.ok_or(ShellError::missing("touch", "missing file operand"))?;
    let target = paths::resolve(path.as_str(), engine.current_dir());

    if target.is_empty() || engine.fs().is_directory(&target) {
        return Err(ShellError::TypeConflict {
            command: "touch",
            action: "touch",
            path: path.to_string(),
            reason: "Is a directory",
        });
    }

    let parent = paths::parent(&target);
    if !parent.is_empty() && !engine.fs().is_directory(parent) {
        return Err(ShellError::ParentNotFound {
            command: "touch",
            action: "touch",
            path: path.to_string(),
        });
    }

    let now = Utc::now();
    let user = engine.config().user.clone();
    match engine.fs_mut().get_mut(&target) {
        Some(entry) => entry.touch(now),
        None => {
            debug!(key = %target, owner = %user, "creating file");
            engine.fs_mut().put(target, VfsEntry::new_file(&user, now));
        }
    }
    Ok(CommandResult::empty())
}

/// Execute `chown [-R] <owner> <path>`.
fn execute_chown(
    recursive: bool,
    owner: Option<String>,
    path: Option<PathArg>,
    engine: &mut Engine,
) -> Result<CommandResult, ShellError> {
    let (Some(owner), Some(path)) = (owner, path) else {
        return Err(ShellError::missing("chown", "missing operand"));
    };
    let target = paths::resolve(path.as_str(), engine.current_dir());

    let fs = engine.fs();
    let keys: Vec<String> = if fs.is_file(&target) {
        vec![target]
    } else if fs.is_directory(&target) {
        let prefix = paths::dir_prefix(&target);
        if recursive {
            fs.keys_with_prefix(&prefix).map(str::to_string).collect()
        } else if fs.get(&prefix).is_some() {
            vec![prefix]
        } else {
            Vec::new()
        }
    } else {
        return Err(ShellError::PathNotFound {
            command: "chown",
            path: path.to_string(),
        });
    };

    let changed = engine
        .fs_mut()
        .set_owner(keys.iter().map(String::as_str), &owner);
    Ok(CommandResult::line(OutputLine::success(format!(
        "chown: changed ownership of {} {} to '{}'",
        changed,
        if changed == 1 { "entry" } else { "entries" },
        owner
    ))))
}

/// Execute `vfs-init`: empty the store and delete the backing archive.
fn execute_vfs_init(engine: &mut Engine) -> CommandResult {
    engine.reset();
    info!("VFS reset to empty state");
    let mut lines = vec![OutputLine::success("VFS initialized to empty state")];

    if let Some(path) = engine.config().vfs_path.as_ref()
        && path.exists()
    {
        match fs::remove_file(path) {
            Ok(()) => lines.push(OutputLine::info(format!(
                "Physical VFS file removed: {}",
                path.display()
            ))),
            Err(source) => {
                let err = ShellError::HostIo {
                    context: format!("vfs-init: failed to remove {}", path.display()),
                    source,
                };
                warn!(error = %err, "could not remove backing archive");
                lines.push(OutputLine::error(err.to_string()));
            }
        }
    }

    CommandResult::output(lines)
}

// =============================================================================
// Tests
// =============================================================================
