//! Executor: orchestration loop for one requested target.
//!
//! validate (whole graph) → plan (requested target) → for each planned
//! target: run its recipe through the command runner. The first failure
//! stops the run; nothing after it is dispatched.

use super::error::MakeError;
use super::graph::DependencyGraph;
use super::planner;
use super::types::RunReport;
use super::validator;
use crate::transport::CommandRunner;
use std::time::Instant;
use tracing::{debug, info};

/// Validate the graph, plan `target`, then run every recipe in order.
pub fn run<R: CommandRunner + ?Sized>(
    graph: &DependencyGraph,
    target: &str,
    runner: &mut R,
) -> Result<RunReport, MakeError> {
    let start = Instant::now();

    validator::validate(graph)?;
    let order = planner::plan(graph, target)?;
    info!(name = target, steps = order.len(), "running target");

    let mut report = execute_order(graph, &order, runner)?;
    report.duration = start.elapsed();

    info!(
        name = target,
        commands = report.commands_run,
        elapsed_ms = report.duration.as_millis() as u64,
        "target complete"
    );
    Ok(report)
}

/// Run the recipes of already-planned targets, in the given order.
pub fn execute_order<R: CommandRunner + ?Sized>(
    graph: &DependencyGraph,
    order: &[String],
    runner: &mut R,
) -> Result<RunReport, MakeError> {
    let start = Instant::now();
    let mut report = RunReport::default();

    for name in order {
        let (output, count) = execute_target(graph, name, runner)?;
        report.output.push_str(&output);
        report.commands_run += count;
        report.order.push(name.clone());
    }

    report.duration = start.elapsed();
    Ok(report)
}

/// Run one target's recipe. Returns the runner's combined output and the
/// number of commands dispatched.
pub fn execute_target<R: CommandRunner + ?Sized>(
    graph: &DependencyGraph,
    name: &str,
    runner: &mut R,
) -> Result<(String, usize), MakeError> {
    let recipe = graph.recipe(name).unwrap_or(&[]);
    if recipe.is_empty() {
        return Err(MakeError::TargetHasNoCommands {
            name: name.to_string(),
        });
    }

    debug!(name, commands = recipe.len(), "executing recipe");
    let mut output = String::new();
    for command in recipe {
        output.push_str(&runner.execute(command)?);
    }
    Ok((output, recipe.len()))
}
