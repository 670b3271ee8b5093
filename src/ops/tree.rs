//! Dependency tree rendering.

use std::collections::HashSet;

use crate::core::PackageRegistry;
use crate::resolver::ResolveError;

/// Options for [`render_tree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Maximum depth to display
    pub max_depth: Option<usize>,

    /// Expand packages that were already printed
    pub duplicates: bool,
}

/// Render the dependency tree of `target`, one package per line.
///
/// Packages already printed are marked with `(*)` and not expanded again
/// unless `duplicates` is set. A package is never expanded inside its own
/// subtree, so cycles always terminate.
pub fn render_tree(
    registry: &PackageRegistry,
    target: &str,
    opts: TreeOptions,
) -> Result<String, ResolveError> {
    let mut out = String::new();
    let mut seen = HashSet::new();
    let mut path = Vec::new();
    write_node(
        registry,
        target,
        None,
        0,
        opts,
        &mut seen,
        &mut path,
        &mut out,
    )?;
    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn write_node<'a>(
    registry: &'a PackageRegistry,
    name: &'a str,
    required_by: Option<&str>,
    depth: usize,
    opts: TreeOptions,
    seen: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
    out: &mut String,
) -> Result<(), ResolveError> {
    if depth > opts.max_depth.unwrap_or(usize::MAX) {
        return Ok(());
    }

    let manifest = registry.require(name, required_by)?;

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };

    let in_cycle = path.contains(&name);
    let is_duplicate = !seen.insert(name);
    let stop = in_cycle || (is_duplicate && !opts.duplicates);
    let marker = if stop { " (*)" } else { "" };

    out.push_str(&format!("{}{}{}\n", prefix, name, marker));

    if stop {
        return Ok(());
    }

    path.push(name);
    for dep in &manifest.dependencies {
        write_node(registry, dep, Some(name), depth + 1, opts, seen, path, out)?;
    }
    path.pop();

    Ok(())
}
