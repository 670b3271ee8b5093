//! Configuration file support for manifold.
//!
//! manifold supports two configuration file locations:
//! - Global: `<config dir>/manifold/config.toml` - User-wide defaults
//! - Project: `<root>/.manifold/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory holding project-local state under a root.
pub const PROJECT_DIR: &str = ".manifold";

/// Configuration filename in both locations.
pub const CONFIG_FILE: &str = "config.toml";

/// manifold configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package discovery settings
    pub packages: PackagesConfig,

    /// Descriptor generation settings
    pub build: BuildConfig,
}

/// Package discovery settings from `[packages]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Package directories outside the root. Relative entries are resolved
    /// against the directory owning the config file.
    #[serde(rename = "extra-paths")]
    pub extra_paths: Vec<PathBuf>,
}

/// Descriptor generation settings from `[build]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Default target package (defaults to the root package)
    pub target: Option<String>,

    /// Prefix namespacing every resource identifier
    pub prefix: Option<String>,

    /// Where `manifold build` writes the descriptor (defaults to stdout)
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Resolve relative paths against `base`.
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        for path in &mut self.packages.extra_paths {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if let Some(output) = &mut self.build.output {
            if output.is_relative() {
                *output = base.join(&*output);
            }
        }
        self
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Extra package paths accumulate instead of being replaced.
    pub fn merge(&mut self, other: Config) {
        self.packages.extra_paths.extend(other.packages.extra_paths);

        if other.build.target.is_some() {
            self.build.target = other.build.target;
        }
        if other.build.prefix.is_some() {
            self.build.prefix = other.build.prefix;
        }
        if other.build.output.is_some() {
            self.build.output = other.build.output;
        }
    }
}

/// Load merged configuration from the global file and the project under
/// `project_root`.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.manifold/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_root: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path {
        if global_path.exists() {
            let base = global_path.parent().unwrap_or(Path::new("."));
            config.merge(Config::load_or_default(global_path).with_base_dir(base));
        }
    }

    // Project config overrides global
    let project_path = project_config_path(project_root);
    if project_path.exists() {
        config.merge(Config::load_or_default(&project_path).with_base_dir(project_root));
    }

    config
}

/// Get the global config path.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "manifold").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Get the project config path (.manifold/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.packages.extra_paths.is_empty());
        assert!(config.build.target.is_none());
        assert!(config.build.prefix.is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[packages]
extra-paths = ["../shared/jquery", "/opt/packages/json"]

[build]
target = "addon-kit"
prefix = "guid-"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(
            config.packages.extra_paths,
            vec![
                PathBuf::from("../shared/jquery"),
                PathBuf::from("/opt/packages/json")
            ]
        );
        assert_eq!(config.build.target.as_deref(), Some("addon-kit"));
        assert_eq!(config.build.prefix.as_deref(), Some("guid-"));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.prefix = Some("a-".to_string());
        base.build.target = Some("app".to_string());
        base.packages.extra_paths = vec![PathBuf::from("/global")];

        let mut override_cfg = Config::default();
        override_cfg.build.prefix = Some("b-".to_string());
        override_cfg.packages.extra_paths = vec![PathBuf::from("/project")];

        base.merge(override_cfg);

        assert_eq!(base.build.prefix.as_deref(), Some("b-"));
        assert_eq!(base.build.target.as_deref(), Some("app")); // Not overridden
        assert_eq!(
            base.packages.extra_paths,
            vec![PathBuf::from("/global"), PathBuf::from("/project")]
        );
    }

    #[test]
    fn test_relative_paths_resolved_against_base() {
        let mut config = Config::default();
        config.packages.extra_paths = vec![PathBuf::from("vendor"), PathBuf::from("/abs")];
        config.build.output = Some(PathBuf::from("out/build.json"));

        let config = config.with_base_dir(Path::new("/root/project"));
        assert_eq!(
            config.packages.extra_paths,
            vec![PathBuf::from("/root/project/vendor"), PathBuf::from("/abs")]
        );
        assert_eq!(
            config.build.output,
            Some(PathBuf::from("/root/project/out/build.json"))
        );
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_root = tmp.path().join("project");
        std::fs::create_dir_all(project_root.join(PROJECT_DIR)).unwrap();

        std::fs::write(
            &global_path,
            r#"
[packages]
extra-paths = ["/opt/shared"]

[build]
prefix = "global-"
target = "app"
"#,
        )
        .unwrap();

        std::fs::write(
            project_config_path(&project_root),
            r#"
[packages]
extra-paths = ["vendor/lib"]

[build]
prefix = "project-"
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_root);

        assert_eq!(config.build.prefix.as_deref(), Some("project-"));
        assert_eq!(config.build.target.as_deref(), Some("app"));
        assert_eq!(
            config.packages.extra_paths,
            vec![PathBuf::from("/opt/shared"), project_root.join("vendor/lib")]
        );
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[build\nprefix = ").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
