//! Output line types returned by the command engine.

use std::fmt;

/// A single line of output produced by the engine.
///
/// The host decides how to style each kind; [`fmt::Display`] gives the plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputLine {
    /// Echo of an executed line (`> ls`)
    Command { prompt: String, input: String },
    /// Plain text output
    Text(String),
    /// Error message
    Error(String),
    /// Success message
    Success(String),
    /// Informational message (load diagnostics, banners)
    Info(String),
}

impl OutputLine {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::Error(s.into())
    }

    pub fn success(s: impl Into<String>) -> Self {
        Self::Success(s.into())
    }

    pub fn info(s: impl Into<String>) -> Self {
        Self::Info(s.into())
    }

    pub fn command(prompt: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Command {
            prompt: prompt.into(),
            input: input.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { prompt, input } => write!(f, "{}{}", prompt, input),
            Self::Text(s) | Self::Error(s) | Self::Success(s) | Self::Info(s) => {
                write!(f, "{}", s)
            }
        }
    }
}
