//! Dependency graph: the parsed rule file, frozen for validation and execution.

use super::error::MakeError;
use super::parser;
use super::types::{Adjacency, CommandMap, ParseOptions};
use std::io::BufRead;
use std::path::Path;

/// Targets with their dependency lists and recipes.
///
/// Built once from a parsed rule file and read-only afterwards; there are no
/// setters, so validation and execution always see the same graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: Adjacency,
    commands: CommandMap,
}

impl DependencyGraph {
    pub fn new(adjacency: Adjacency, commands: CommandMap) -> Self {
        Self {
            adjacency,
            commands,
        }
    }

    /// Parse rule-file text into a graph.
    pub fn parse(text: &str, options: &ParseOptions) -> Result<Self, MakeError> {
        let (adjacency, commands) = parser::parse_rules(text, options)?;
        Ok(Self::new(adjacency, commands))
    }

    /// Parse rule-file lines from a reader into a graph.
    pub fn from_reader<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Self, MakeError> {
        let (adjacency, commands) = parser::parse_reader(reader, options)?;
        Ok(Self::new(adjacency, commands))
    }

    /// Read and parse a rule file into a graph.
    pub fn from_file(path: &Path, options: &ParseOptions) -> Result<Self, MakeError> {
        let (adjacency, commands) = parser::parse_rule_file(path, options)?;
        Ok(Self::new(adjacency, commands))
    }

    pub fn contains(&self, target: &str) -> bool {
        self.adjacency.contains_key(target)
    }

    /// The graph's own copy of a target name, if it is defined.
    pub fn get_key(&self, target: &str) -> Option<&str> {
        self.adjacency.get_key_value(target).map(|(k, _)| k.as_str())
    }

    /// Dependency names of a target, in declaration order.
    pub fn dependencies(&self, target: &str) -> Option<&[String]> {
        self.adjacency.get(target).map(Vec::as_slice)
    }

    /// Recipe of a target, in declaration order.
    pub fn recipe(&self, target: &str) -> Option<&[String]> {
        self.commands.get(target).map(Vec::as_slice)
    }

    /// Target names in rule-file order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn commands(&self) -> &CommandMap {
        &self.commands
    }
}
