//! Dry-run transport: print commands without starting anything.

use super::{CommandLine, CommandRunner};
use crate::core::error::{CommandFailure, MakeError};
use std::io::Write;

/// Writes every command it is given and reports it as run.
///
/// The silent marker is stripped but ignored: a dry run shows every command.
pub struct DryRunner<W: Write> {
    out: W,
}

impl DryRunner<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> DryRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandRunner for DryRunner<W> {
    fn execute(&mut self, command: &str) -> Result<String, MakeError> {
        let line = CommandLine::parse(command).ok_or_else(|| MakeError::CommandFailed {
            command: command.to_string(),
            cause: CommandFailure::Empty,
        })?;
        writeln!(self.out, "{}", line.text)?;
        Ok(format!("{}\n", line.text))
    }
}
