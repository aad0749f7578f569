//! Shared types for rule files, parsing options and run results.
//!
//! The adjacency and command maps are `IndexMap`s so iteration follows the
//! order in which targets appear in the rule file.

use indexmap::IndexMap;
use std::fmt;
use std::time::Duration;

// ============================================================================
// Graph maps
// ============================================================================

/// Target name → dependency names, in rule-file order.
pub type Adjacency = IndexMap<String, Vec<String>>;

/// Target name → recipe (raw command strings), in rule-file order.
pub type CommandMap = IndexMap<String, Vec<String>>;

/// Marker that suppresses the echo of a command line.
pub const SILENT_MARKER: char = '@';

/// Marker that introduces a command line.
pub const COMMAND_INDENT: char = '\t';

/// Marker that introduces a comment line.
pub const COMMENT_MARKER: char = '#';

/// Rule file read when none is given.
pub const DEFAULT_RULE_FILE: &str = "Makefile";

// ============================================================================
// Parse options
// ============================================================================

/// What to do when a rule file defines the same target twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Replace the earlier dependency list, clear its recipe and warn.
    #[default]
    Overwrite,
    /// Fail with `DuplicateTarget`.
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Options that tune rule-file parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Redefinition handling
    pub duplicates: DuplicatePolicy,
}

impl ParseOptions {
    /// Options that reject duplicate target definitions.
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

// ============================================================================
// Run result
// ============================================================================

/// Result of running a target and its dependencies.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Targets in the order their recipes ran
    pub order: Vec<String>,

    /// Number of commands dispatched to the runner
    pub commands_run: usize,

    /// Everything the runner returned: echoed lines and streamed output
    pub output: String,

    pub duration: Duration,
}
