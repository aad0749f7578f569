//! Execution planning: dependency-first order for one requested target.

use super::error::MakeError;
use super::graph::DependencyGraph;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Compute the order in which recipes run to build `target`.
///
/// Depth-first post-order from `target`: dependencies are visited in the
/// order they are listed, a target already seen in this traversal is
/// skipped, and each target is appended once all its dependencies are.
/// `target` is always the last element.
///
/// Targets are marked when first entered, so the walk terminates even on a
/// graph that was never validated.
pub fn plan(graph: &DependencyGraph, target: &str) -> Result<Vec<String>, MakeError> {
    let Some(root) = graph.get_key(target) else {
        return Err(MakeError::TargetNotFound {
            name: target.to_string(),
        });
    };

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
    visited.insert(root);

    while let Some(&(node, next)) = stack.last() {
        let deps = graph.dependencies(node).unwrap_or(&[]);
        match deps.get(next) {
            Some(dep) => {
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }
                if visited.insert(dep.as_str()) {
                    stack.push((dep.as_str(), 0));
                }
            }
            None => {
                order.push(node.to_string());
                stack.pop();
            }
        }
    }

    debug!(name = target, steps = order.len(), "execution order computed");
    Ok(order)
}
