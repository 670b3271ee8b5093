//! DependencyGraph - the closure of a target as a directed graph.
//!
//! An edge `a -> b` means `a` declares `b` in its `dependencies`. The graph
//! is built after resolution and is only used for reporting: tree output,
//! cycle warnings and an optional dependencies-first ordering.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::PackageRegistry;
use crate::resolver::errors::ResolveError;

/// Directed dependency graph over a resolved closure.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    name_to_node: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for `closure`, usually the output of
    /// [`resolve_dependencies`](super::resolve_dependencies).
    pub fn from_closure(
        registry: &PackageRegistry,
        closure: &[String],
    ) -> Result<Self, ResolveError> {
        let mut graph = DependencyGraph::new();

        for name in closure {
            graph.add_package(name);
        }

        for name in closure {
            let manifest = registry.require(name, None)?;
            for dep in &manifest.dependencies {
                registry.require(dep, Some(name))?;
                graph.add_package(dep);
                graph.add_edge(name, dep);
            }
        }

        Ok(graph)
    }

    /// Add a package node if it is not present yet.
    pub fn add_package(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.name_to_node.get(name) {
            return node;
        }
        let node = self.graph.add_node(name.to_string());
        self.name_to_node.insert(name.to_string(), node);
        node
    }

    /// Add a dependency edge between packages.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from_node = self.add_package(from);
        let to_node = self.add_package(to);
        if !self.graph.contains_edge(from_node, to_node) {
            self.graph.add_edge(from_node, to_node, ());
        }
    }

    /// Direct dependencies of a package, in declared order.
    pub fn deps(&self, name: &str) -> Vec<&str> {
        // petgraph yields the most recently added edge first
        let mut deps = self.neighbors(name, Direction::Outgoing);
        deps.reverse();
        deps
    }

    /// Packages that depend on the given package.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        let mut dependents = self.neighbors(name, Direction::Incoming);
        dependents.sort_unstable();
        dependents
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        match self.name_to_node.get(name) {
            Some(&node) => self
                .graph
                .neighbors_directed(node, direction)
                .map(|n| self.graph[n].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Groups of packages that depend on each other, each sorted by name.
    ///
    /// A package depending on itself counts as a cycle of one.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut names: Vec<String> =
                    scc.into_iter().map(|n| self.graph[n].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Packages with dependencies before dependents, or `None` if the graph
    /// has a cycle.
    pub fn topological_order(&self) -> Option<Vec<String>> {
        let mut order: Vec<String> = toposort(&self.graph, None)
            .ok()?
            .into_iter()
            .map(|n| self.graph[n].clone())
            .collect();

        // toposort puts `a` before `b` for an edge a -> b, i.e. dependents first
        order.reverse();
        Some(order)
    }

    /// Check if a package is in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Get the number of packages.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
