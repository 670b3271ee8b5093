//! `manifold deps` command

use anyhow::Result;

use crate::cli::DepsArgs;
use crate::commands::Project;
use manifold::ops::{load_registry, root_package_name};
use manifold::resolver::{resolve_dependencies, DependencyGraph};

pub fn execute(project: &Project, args: DepsArgs) -> Result<()> {
    project.ensure_root()?;

    let registry = load_registry(&project.root, &project.extra_paths())?;
    let target = match args.target.or_else(|| project.config.build.target.clone()) {
        Some(target) => target,
        None => root_package_name(&project.root)?,
    };

    let mut deps = resolve_dependencies(&registry, &target)?;

    if args.topo {
        let graph = DependencyGraph::from_closure(&registry, &deps)?;
        deps = graph.topological_order().ok_or_else(|| {
            let cycles: Vec<_> = graph.cycles().iter().map(|c| c.join(" <-> ")).collect();
            anyhow::anyhow!(
                "cannot order dependencies of `{}`: cycle between {}",
                target,
                cycles.join("; ")
            )
        })?;
    }

    for dep in deps {
        println!("{}", dep);
    }

    Ok(())
}
