//! Global context for manifold operations.
//!
//! Provides centralized access to the working directory, configuration
//! locations and output settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::MANIFEST_NAME;
use crate::util::config::{self, Config};
use crate::util::fs::absolute_path;

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global configuration file, if a config directory exists
    global_config: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            global_config: config::global_config_path(),
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different global config file (or none).
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_config.as_deref()
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// The project root: `root` if given (relative to cwd), else cwd.
    pub fn project_root(&self, root: Option<&Path>) -> PathBuf {
        match root {
            Some(root) => absolute_path(&self.cwd, root),
            None => self.cwd.clone(),
        }
    }

    /// Check that `root` holds a root manifest.
    pub fn ensure_root_manifest(&self, root: &Path) -> Result<()> {
        let manifest = root.join(MANIFEST_NAME);
        if !manifest.is_file() {
            anyhow::bail!(
                "could not find {} in {}\n\
                 help: Run from a package root or pass `--root <dir>`",
                MANIFEST_NAME,
                root.display()
            );
        }
        Ok(())
    }

    /// Load merged global and project configuration for `root`.
    pub fn load_config(&self, root: &Path) -> Config {
        config::load_config(self.global_config_path(), root)
    }
}
