//! Command runners: the boundary between the executor and the processes it starts.

pub mod dry_run;
pub mod local;

pub use dry_run::DryRunner;
pub use local::LocalRunner;

use crate::core::error::MakeError;
use crate::core::types::SILENT_MARKER;

/// Runs one recipe command at a time.
///
/// Returns the text the command produced as seen by the user: the echoed
/// command line (unless suppressed) followed by the command's output.
pub trait CommandRunner {
    fn execute(&mut self, command: &str) -> Result<String, MakeError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn execute(&mut self, command: &str) -> Result<String, MakeError> {
        (**self).execute(command)
    }
}

/// A recipe command split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// Command text with the silent marker removed
    pub text: &'a str,

    /// Whether the command line is echoed before it runs
    pub echo: bool,

    pub program: &'a str,
    pub args: Vec<&'a str>,
}

impl<'a> CommandLine<'a> {
    /// Split a raw command string. Returns `None` when no program remains.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        let (text, echo) = match raw.strip_prefix(SILENT_MARKER) {
            Some(rest) => (rest.trim_start(), false),
            None => (raw, true),
        };
        let mut words = text.split_whitespace();
        let program = words.next()?;
        Some(Self {
            text,
            echo,
            program,
            args: words.collect(),
        })
    }
}
