//! Error kinds for every pipeline stage: parse, validate, plan, execute.

use std::path::PathBuf;
use thiserror::Error;

/// Why a rule-file line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatIssue {
    /// A command line appeared before any target was declared.
    #[error("global command")]
    GlobalCommand,

    /// A command line held nothing but the silent marker.
    #[error("empty command")]
    EmptyCommand,

    /// The line is not blank, a comment, a command or a target.
    #[error("unrecognized line")]
    Unrecognized,
}

/// Why a dispatched command did not succeed.
#[derive(Debug, Error)]
pub enum CommandFailure {
    /// The command line had no program token.
    #[error("no program to run")]
    Empty,

    /// The process could not be started.
    #[error("spawn failed: {0}")]
    Spawn(#[source] std::io::Error),

    /// Reading the child's output failed.
    #[error("output stream failed: {0}")]
    Stream(#[source] std::io::Error),

    /// The process exited with a non-zero status.
    #[error("exit code {code}")]
    Exit { code: i32 },

    /// The process was killed before it could exit.
    #[error("terminated by signal")]
    Signal,
}

/// Errors produced while loading, validating, planning or running targets.
#[derive(Debug, Error)]
pub enum MakeError {
    #[error("invalid format at line {line}: {issue}")]
    Format { line: usize, issue: FormatIssue },

    #[error("target '{name}' redefined at line {line}")]
    DuplicateTarget { name: String, line: usize },

    #[error("circular dependency detected between '{from}' -> '{to}'")]
    CycleDetected { from: String, to: String },

    #[error("missing dependencies: '{}'", .names.join(", "))]
    MissingDependency { names: Vec<String> },

    #[error("target '{name}' does not exist")]
    TargetNotFound { name: String },

    #[error("nothing to be done for '{name}': target has no commands")]
    TargetHasNoCommands { name: String },

    #[error("binary not found: '{name}'")]
    BinaryNotFound { name: String },

    #[error("command '{command}' failed: {cause}")]
    CommandFailed {
        command: String,
        #[source]
        cause: CommandFailure,
    },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_line() {
        let err = MakeError::Format {
            line: 3,
            issue: FormatIssue::GlobalCommand,
        };
        assert_eq!(err.to_string(), "invalid format at line 3: global command");
    }

    #[test]
    fn test_cycle_error_names_edge() {
        let err = MakeError::CycleDetected {
            from: "run".into(),
            to: "build".into(),
        };
        assert_eq!(
            err.to_string(),
            "circular dependency detected between 'run' -> 'build'"
        );
    }

    #[test]
    fn test_missing_dependency_lists_all() {
        let err = MakeError::MissingDependency {
            names: vec!["build".into(), "make".into()],
        };
        assert_eq!(err.to_string(), "missing dependencies: 'build, make'");
    }

    #[test]
    fn test_command_failed_exit_code() {
        let err = MakeError::CommandFailed {
            command: "false".into(),
            cause: CommandFailure::Exit { code: 1 },
        };
        assert_eq!(err.to_string(), "command 'false' failed: exit code 1");

        assert_eq!(CommandFailure::Signal.to_string(), "terminated by signal");
    }

    #[test]
    fn test_read_file_shows_path() {
        let err = MakeError::ReadFile {
            path: PathBuf::from("/nope/Makefile"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to read /nope/Makefile"));
    }
}
