//! Core business logic for the shell.
//!
//! This module provides:
//! - [`Engine`] command dispatch over one [`VirtualFs`]
//! - [`Command`] parsing and [`execute_command`] execution
//! - [`paths`] canonical key resolution
//! - [`archive`] zip loading with common-prefix stripping

pub mod archive;
mod commands;
mod engine;
pub mod error;
mod filesystem;
pub mod glob;
pub mod parser;
pub mod paths;

pub use commands::{Command, CommandResult, PathArg, execute_command};
pub use engine::Engine;
pub use filesystem::VirtualFs;
pub use parser::parse_input;
