//! vfsh: a shell emulator over an in-memory virtual filesystem.
//!
//! The filesystem is seeded from a zip archive and manipulated with a small
//! command set (`ls`, `cd`, `pwd`, `find`, `touch`, `chown`, `vfs-init`,
//! `exit`). Nothing is written back to the archive.

pub mod app;
pub mod config;
pub mod core;
pub mod models;

pub use app::Session;
pub use config::ShellConfig;
