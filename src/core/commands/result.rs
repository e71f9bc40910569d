//! Command execution result type.

use crate::models::OutputLine;

/// Result of executing a command.
///
/// Commands produce output and may ask the host to end the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Output lines to display
    pub output: Vec<OutputLine>,
    /// Set by `exit`: the host should tear the session down
    pub exit: bool,
}

impl CommandResult {
    /// Create a result with just output.
    pub fn output(lines: Vec<OutputLine>) -> Self {
        Self {
            output: lines,
            exit: false,
        }
    }

    /// Create a result holding a single line.
    pub fn line(line: OutputLine) -> Self {
        Self::output(vec![line])
    }

    /// Create an empty result (no output).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result that ends the session.
    pub fn exit() -> Self {
        Self {
            output: vec![],
            exit: true,
        }
    }

    /// Plain text of every output line.
    pub fn lines(&self) -> Vec<String> {
        self.output.iter().map(ToString::to_string).collect()
    }
}
