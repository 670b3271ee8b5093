//! Dependency resolution.
//!
//! Computes the transitive closure of a target over the `dependencies`
//! relation. There is no version selection: every package name maps to
//! exactly one manifest in the registry.

pub mod errors;
pub mod graph;

pub use errors::ResolveError;
pub use graph::DependencyGraph;

use crate::core::PackageRegistry;

/// Compute every package reachable from `target`, including `target`.
///
/// The walk is an iterative depth-first traversal with an explicit stack:
/// pop a name, skip it if already visited, otherwise record it and push its
/// direct dependencies in declared order. Each reachable name appears once,
/// the target comes first, and the rest follow stack order. The result is
/// NOT topologically sorted.
///
/// Cycles terminate through the visited check and are not reported.
///
/// Fails with [`ResolveError::UnknownPackage`] naming the first missing
/// package encountered, together with the package that required it.
pub fn resolve_dependencies(
    registry: &PackageRegistry,
    target: &str,
) -> Result<Vec<String>, ResolveError> {
    let mut visited: Vec<String> = Vec::new();
    let mut stack: Vec<(String, Option<String>)> = vec![(target.to_string(), None)];

    while let Some((name, required_by)) = stack.pop() {
        if visited.contains(&name) {
            continue;
        }

        let manifest = registry.require(&name, required_by.as_deref())?;
        stack.extend(
            manifest
                .dependencies
                .iter()
                .map(|dep| (dep.clone(), Some(name.clone()))),
        );
        visited.push(name);
    }

    tracing::debug!("resolved {} packages for `{}`", visited.len(), target);
    Ok(visited)
}
