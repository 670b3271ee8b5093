//! `manifold packages` command

use anyhow::Result;

use crate::cli::PackagesArgs;
use crate::commands::Project;
use manifold::ops::load_registry;
use manifold::util::fs::relative_path;

pub fn execute(project: &Project, args: PackagesArgs) -> Result<()> {
    project.ensure_root()?;

    let registry = load_registry(&project.root, &project.extra_paths())?;

    if args.json {
        let manifests: Vec<_> = registry.packages().collect();
        println!("{}", serde_json::to_string_pretty(&manifests)?);
        return Ok(());
    }

    for manifest in registry.packages() {
        let dir = relative_path(&project.root, manifest.root());
        let dir = if dir.as_os_str().is_empty() {
            ".".into()
        } else {
            dir.display().to_string()
        };
        println!("{} ({})", manifest.name, dir);
    }

    Ok(())
}
