//! `manifold build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::Project;
use manifold::ops::{render_descriptor, resolve_target, write_descriptor};

pub fn execute(project: &Project, args: BuildArgs) -> Result<()> {
    project.ensure_root()?;

    let opts = project.resolve_options(args.target, args.prefix);
    let resolved = resolve_target(&project.root, &opts)?;

    tracing::debug!(
        "`{}` depends on {} packages",
        resolved.target,
        resolved.deps.len() - 1
    );

    // Output: CLI > config > stdout
    match args.output.or_else(|| project.config.build.output.clone()) {
        Some(path) => {
            let path = manifold::util::fs::absolute_path(project.ctx.cwd(), &path);
            write_descriptor(&resolved.descriptor, &path)?;
        }
        None => println!("{}", render_descriptor(&resolved.descriptor)?),
    }

    Ok(())
}
