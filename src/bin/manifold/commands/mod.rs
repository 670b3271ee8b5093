//! Command implementations

pub mod build;
pub mod completions;
pub mod deps;
pub mod packages;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::Result;

use manifold::ops::ResolveOptions;
use manifold::util::{Config, GlobalContext};

/// Root directory and merged configuration shared by every command.
pub struct Project {
    pub ctx: GlobalContext,
    pub root: PathBuf,
    pub config: Config,
    /// `--path` values, searched in addition to configured extra paths
    pub paths: Vec<PathBuf>,
}

impl Project {
    pub fn load(ctx: &GlobalContext, root: Option<&Path>, paths: &[PathBuf]) -> Result<Self> {
        let root = ctx.project_root(root);
        let config = ctx.load_config(&root);
        let paths = paths
            .iter()
            .map(|p| manifold::util::fs::absolute_path(ctx.cwd(), p))
            .collect();

        Ok(Project {
            ctx: ctx.clone(),
            root,
            config,
            paths,
        })
    }

    /// Configured extra paths followed by command-line ones.
    pub fn extra_paths(&self) -> Vec<PathBuf> {
        let mut extra = self.config.packages.extra_paths.clone();
        extra.extend(self.paths.iter().cloned());
        extra
    }

    /// Resolve options: command-line values override configuration.
    pub fn resolve_options(&self, target: Option<String>, prefix: Option<String>) -> ResolveOptions {
        ResolveOptions {
            extra_paths: self.extra_paths(),
            target: target.or_else(|| self.config.build.target.clone()),
            prefix: prefix
                .or_else(|| self.config.build.prefix.clone())
                .unwrap_or_default(),
        }
    }

    pub fn ensure_root(&self) -> Result<()> {
        self.ctx.ensure_root_manifest(&self.root)
    }
}
