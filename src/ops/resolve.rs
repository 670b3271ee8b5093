//! Target resolution operations.
//!
//! Runs the whole pipeline for one root: registry, dependency closure and
//! build descriptor.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::{generate_descriptor, BuildDescriptor};
use crate::core::{build_registry, load_manifest, PackageRegistry};
use crate::resolver::{resolve_dependencies, DependencyGraph};

/// Options for [`resolve_target`].
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Package directories outside the root
    pub extra_paths: Vec<PathBuf>,

    /// Package to build; the root package when `None`
    pub target: Option<String>,

    /// Prefix namespacing resource identifiers
    pub prefix: String,
}

/// Everything produced for one target.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// The target package name
    pub target: String,

    /// All discovered packages
    pub registry: PackageRegistry,

    /// Dependency closure of the target, target first
    pub deps: Vec<String>,

    /// The generated descriptor
    pub descriptor: BuildDescriptor,
}

/// Build the registry for `root`, adding context to failures.
pub fn load_registry(root: &Path, extra_paths: &[PathBuf]) -> Result<PackageRegistry> {
    let registry = build_registry(root, extra_paths)
        .with_context(|| format!("failed to load packages for {}", root.display()))?;

    tracing::info!(
        "Found {} packages in {} directories",
        registry.len(),
        registry.paths().len()
    );
    Ok(registry)
}

/// Name of the package whose manifest lives in `root`.
pub fn root_package_name(root: &Path) -> Result<String> {
    let manifest = load_manifest(root)
        .with_context(|| format!("failed to read root package in {}", root.display()))?;
    Ok(manifest.name)
}

/// Resolve `target` (or the root package) and generate its descriptor.
pub fn resolve_target(root: &Path, opts: &ResolveOptions) -> Result<ResolvedTarget> {
    let registry = load_registry(root, &opts.extra_paths)?;

    let target = match &opts.target {
        Some(target) => target.clone(),
        None => root_package_name(root)?,
    };

    let deps = resolve_dependencies(&registry, &target)
        .with_context(|| format!("failed to resolve dependencies of `{}`", target))?;

    warn_on_cycles(&registry, &deps)?;

    let descriptor = generate_descriptor(&registry, &target, &deps, &opts.prefix)?;

    Ok(ResolvedTarget {
        target,
        registry,
        deps,
        descriptor,
    })
}

fn warn_on_cycles(registry: &PackageRegistry, deps: &[String]) -> Result<()> {
    let graph = DependencyGraph::from_closure(registry, deps)?;
    for cycle in graph.cycles() {
        tracing::warn!("dependency cycle between {}", cycle.join(", "));
    }
    Ok(())
}
