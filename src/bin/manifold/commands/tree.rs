//! `manifold tree` command

use anyhow::Result;

use crate::cli::TreeArgs;
use crate::commands::Project;
use manifold::ops::{load_registry, render_tree, root_package_name, TreeOptions};

pub fn execute(project: &Project, args: TreeArgs) -> Result<()> {
    project.ensure_root()?;

    let registry = load_registry(&project.root, &project.extra_paths())?;
    let target = match args.package.or_else(|| project.config.build.target.clone()) {
        Some(package) => package,
        None => root_package_name(&project.root)?,
    };

    let opts = TreeOptions {
        max_depth: args.depth,
        duplicates: args.duplicates,
    };
    print!("{}", render_tree(&registry, &target, opts)?);

    Ok(())
}
