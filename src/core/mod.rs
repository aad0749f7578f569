//! Core build logic: types, parsing, graph, validation, planning, execution.

pub mod error;
pub mod executor;
pub mod graph;
pub mod parser;
pub mod planner;
pub mod types;
pub mod validator;
