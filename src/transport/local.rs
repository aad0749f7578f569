//! Local execution: spawn the program directly and stream its stdout.

use super::{CommandLine, CommandRunner};
use crate::core::error::{CommandFailure, MakeError};
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs commands as local child processes.
///
/// The program is looked up on `PATH`, started with the remaining words as
/// separate arguments (no shell), and its stdout is copied to `out` line by
/// line while it runs. Stderr is inherited.
pub struct LocalRunner<W: Write> {
    out: W,
}

impl LocalRunner<std::io::Stdout> {
    /// A runner that streams to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> LocalRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandRunner for LocalRunner<W> {
    fn execute(&mut self, command: &str) -> Result<String, MakeError> {
        let line = CommandLine::parse(command).ok_or_else(|| MakeError::CommandFailed {
            command: command.to_string(),
            cause: CommandFailure::Empty,
        })?;

        let program = which::which(line.program).map_err(|_| MakeError::BinaryNotFound {
            name: line.program.to_string(),
        })?;

        let mut captured = String::new();
        if line.echo {
            writeln!(self.out, "{}", line.text)?;
            self.out.flush()?;
            captured.push_str(line.text);
            captured.push('\n');
        }

        debug!(program = %program.display(), args = ?line.args, "spawning process");
        let failed = |cause| MakeError::CommandFailed {
            command: line.text.to_string(),
            cause,
        };

        let mut child = Command::new(&program)
            .args(&line.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| failed(CommandFailure::Spawn(e)))?;

        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let text = String::from_utf8_lossy(&buf);
                        let text = text.trim_end_matches(['\n', '\r']);
                        let written = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
                        if let Err(e) = written {
                            let _ = child.kill();
                            let _ = child.wait();
                            return Err(MakeError::Io(e));
                        }
                        captured.push_str(text);
                        captured.push('\n');
                    }
                    Err(e) => {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(failed(CommandFailure::Stream(e)));
                    }
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| failed(CommandFailure::Stream(e)))?;
        if !status.success() {
            let cause = match status.code() {
                Some(code) => CommandFailure::Exit { code },
                None => CommandFailure::Signal,
            };
            return Err(failed(cause));
        }

        Ok(captured)
    }
}
