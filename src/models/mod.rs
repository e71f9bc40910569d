//! Data models shared by the engine and the host.
//!
//! Contains domain types for:
//! - [`VfsEntry`], [`FileContent`] - Virtual filesystem entries
//! - [`OutputLine`] - Lines produced by command execution

mod filesystem;
mod terminal;

pub use filesystem::{FileContent, VfsEntry};
pub use terminal::OutputLine;
