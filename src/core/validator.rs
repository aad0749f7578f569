//! Whole-graph validation: cycle detection and missing-dependency detection.
//!
//! Both checks cover every target in the graph, not only the part reachable
//! from the requested target, and both run before any command executes.

use super::error::MakeError;
use super::graph::DependencyGraph;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::debug;

/// DFS state of a node that has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path.
    OnPath,
    /// Fully explored; no cycle runs through it.
    Done,
}

/// Run all checks: cycles first, then missing dependencies.
pub fn validate(graph: &DependencyGraph) -> Result<(), MakeError> {
    check_cycles(graph)?;

    let missing = missing_dependencies(graph);
    if !missing.is_empty() {
        return Err(MakeError::MissingDependency { names: missing });
    }

    debug!(targets = graph.len(), "graph validated");
    Ok(())
}

/// Fail with the first back-edge found by a depth-first search.
///
/// Roots are taken in rule-file order and dependencies in list order, so the
/// reported edge is stable for a given rule file. The search uses an explicit
/// stack of `(node, next dependency index)` frames.
pub fn check_cycles(graph: &DependencyGraph) -> Result<(), MakeError> {
    let mut marks: FxHashMap<&str, Mark> = FxHashMap::default();

    for root in graph.targets() {
        if marks.contains_key(root) {
            continue;
        }
        marks.insert(root, Mark::OnPath);
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

        while let Some(&(node, next)) = stack.last() {
            let deps = graph.dependencies(node).unwrap_or(&[]);
            let Some(dep) = deps.get(next) else {
                marks.insert(node, Mark::Done);
                stack.pop();
                continue;
            };
            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }

            match marks.get(dep.as_str()) {
                Some(Mark::OnPath) => {
                    return Err(MakeError::CycleDetected {
                        from: node.to_string(),
                        to: dep.clone(),
                    });
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(dep.as_str(), Mark::OnPath);
                    stack.push((dep.as_str(), 0));
                }
            }
        }
    }

    Ok(())
}

/// Every dependency name that is not itself a target, each listed once.
pub fn missing_dependencies(graph: &DependencyGraph) -> Vec<String> {
    let mut missing: IndexSet<&str> = IndexSet::new();
    for target in graph.targets() {
        for dep in graph.dependencies(target).unwrap_or(&[]) {
            if !graph.contains(dep) {
                missing.insert(dep.as_str());
            }
        }
    }
    missing.into_iter().map(str::to_string).collect()
}
