//! mkrun: a minimal make-style build runner.
//!
//! Reads a rule file of targets, dependencies and recipes, rejects cyclic or
//! dangling graphs, and runs a target's recipe after those of everything it
//! depends on, streaming each command's output as it happens.

pub mod cli;
pub mod core;
pub mod transport;

pub use crate::core::error::MakeError;
pub use crate::core::graph::DependencyGraph;
pub use crate::core::types::{DuplicatePolicy, ParseOptions, RunReport};
pub use crate::transport::{CommandRunner, DryRunner, LocalRunner};
