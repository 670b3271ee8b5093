//! Test fixtures for common test scenarios.
//!
//! This module provides package directory generators and in-memory
//! registries for testing resolution and descriptor generation.

use std::path::{Path, PathBuf};

use crate::core::{Manifest, PackageRegistry, MANIFEST_NAME};

/// Fixture for a single package directory.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    /// The manifest written to `package.json`.
    pub manifest: Manifest,
    /// Additional raw JSON fields merged into the manifest.
    pub extra: Vec<(String, serde_json::Value)>,
}

impl PackageFixture {
    /// Create a fixture with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        PackageFixture {
            manifest: Manifest::new(name),
            extra: Vec::new(),
        }
    }

    /// Set the declared dependencies.
    pub fn deps(mut self, deps: &[&str]) -> Self {
        self.manifest.dependencies = to_strings(deps);
        self
    }

    /// Set the exposed library directories.
    pub fn lib(mut self, dirs: &[&str]) -> Self {
        self.manifest.lib = to_strings(dirs);
        self
    }

    /// Set the exposed test directories.
    pub fn tests(mut self, dirs: &[&str]) -> Self {
        self.manifest.tests = to_strings(dirs);
        self
    }

    /// Set the loader suffix.
    pub fn loader(mut self, loader: &str) -> Self {
        self.manifest.loader = Some(loader.to_string());
        self
    }

    /// Set the extension search directories.
    pub fn python_lib(mut self, dirs: &[&str]) -> Self {
        self.manifest.python_lib = to_strings(dirs);
        self
    }

    /// Set the extension identifiers.
    pub fn plugins(mut self, ids: &[&str]) -> Self {
        self.manifest.python_plugins = to_strings(ids);
        self
    }

    /// Add an opaque field.
    pub fn field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.extra.push((key.to_string(), value));
        self
    }

    /// Write `package.json` into `dir`, creating it if needed.
    pub fn write(&self, dir: &Path) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();

        let mut manifest = self.manifest.clone();
        for (key, value) in &self.extra {
            manifest.extra.insert(key.clone(), value.clone());
        }

        let path = dir.join(MANIFEST_NAME);
        std::fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
        path
    }
}

/// Build an in-memory registry rooted at `/pkgs/<name>` for each fixture.
pub fn registry_of(fixtures: Vec<PackageFixture>) -> PackageRegistry {
    let mut registry = PackageRegistry::new();
    for fixture in fixtures {
        let dir = PathBuf::from("/pkgs").join(&fixture.manifest.name);
        registry.insert(dir, fixture.manifest);
    }
    registry
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
