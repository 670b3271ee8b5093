//! Package registry - every package visible to one resolution session.
//!
//! The registry is assembled from the root's `packages/` directory, any
//! extra search paths and the root itself. It is built once and read-only
//! afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::manifest::{load_manifest, Manifest, ManifestError};
use crate::resolver::errors::ResolveError;
use crate::util::diagnostic::Diagnostic;
use crate::util::fs::{absolute_path, list_subdirs};

/// Conventional directory holding bundled packages under a root.
pub const PACKAGES_DIR: &str = "packages";

/// Error building a registry.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum RegistryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to list package directory {}", .path.display())]
    #[diagnostic(code(manifold::registry::read_dir))]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to get current directory")]
    #[diagnostic(code(manifold::registry::cwd))]
    CurrentDir(#[source] io::Error),
}

impl RegistryError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RegistryError::Manifest(e) => e.to_diagnostic(),
            RegistryError::ReadDir { path, source } => {
                Diagnostic::error("failed to list package directory")
                    .with_location(path)
                    .with_context(source.to_string())
            }
            RegistryError::CurrentDir(source) => {
                Diagnostic::error("failed to get current directory")
                    .with_context(source.to_string())
            }
        }
    }
}

/// All packages discovered for one root.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    /// Absolute directories that were loaded
    paths: BTreeSet<PathBuf>,

    /// Manifests by declared package name
    packages: BTreeMap<String, Manifest>,
}

impl PackageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a manifest loaded from `path`.
    ///
    /// A manifest with an already-registered name replaces the earlier one.
    /// Returns the replaced manifest, if any.
    pub fn insert(&mut self, path: PathBuf, manifest: Manifest) -> Option<Manifest> {
        let manifest = manifest.with_root_dir(path.clone());
        self.paths.insert(path);
        self.packages.insert(manifest.name.clone(), manifest)
    }

    /// Get a package by name.
    pub fn get(&self, name: &str) -> Option<&Manifest> {
        self.packages.get(name)
    }

    /// Get a package by name, failing with [`ResolveError::UnknownPackage`].
    ///
    /// `required_by` names the package that referenced `name`, if any.
    pub fn require(&self, name: &str, required_by: Option<&str>) -> Result<&Manifest, ResolveError> {
        self.get(name)
            .ok_or_else(|| ResolveError::unknown_package(self, name, required_by))
    }

    /// Check if a package is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Registered package names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Registered packages, sorted by name.
    pub fn packages(&self) -> impl Iterator<Item = &Manifest> {
        self.packages.values()
    }

    /// Every directory that was loaded, sorted.
    pub fn paths(&self) -> &BTreeSet<PathBuf> {
        &self.paths
    }

    /// Number of registered packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Discover and load every package reachable from `root_dir`.
///
/// Candidates are each subdirectory of `root_dir/packages`, every entry of
/// `extra_paths` and `root_dir` itself. They are made absolute, deduplicated
/// and loaded in sorted path order. Any manifest failure aborts the build.
pub fn build_registry(
    root_dir: &Path,
    extra_paths: &[PathBuf],
) -> Result<PackageRegistry, RegistryError> {
    let cwd = std::env::current_dir().map_err(RegistryError::CurrentDir)?;

    let mut candidates = Vec::new();

    let packages_dir = root_dir.join(PACKAGES_DIR);
    if packages_dir.is_dir() {
        let dirs = list_subdirs(&packages_dir).map_err(|source| RegistryError::ReadDir {
            path: packages_dir.clone(),
            source,
        })?;
        candidates.extend(dirs);
    }

    candidates.extend(extra_paths.iter().cloned());
    candidates.push(root_dir.to_path_buf());

    let paths: BTreeSet<PathBuf> = candidates
        .iter()
        .map(|p| absolute_path(&cwd, p))
        .collect();

    tracing::debug!(
        "discovered {} package directories under {}",
        paths.len(),
        root_dir.display()
    );

    let mut registry = PackageRegistry::new();
    for path in paths {
        let manifest = load_manifest(&path)?;
        if let Some(previous) = registry.insert(path.clone(), manifest) {
            tracing::warn!(
                "package `{}` at {} replaces the one at {}",
                previous.name,
                path.display(),
                previous.root().display()
            );
        }
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::PackageFixture;
    use tempfile::TempDir;

    #[test]
    fn test_registry_includes_root_and_packages() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("app").write(tmp.path());
        PackageFixture::new("api-utils").write(&tmp.path().join("packages/api-utils"));
        PackageFixture::new("addon-kit").write(&tmp.path().join("packages/addon-kit"));

        let registry = build_registry(tmp.path(), &[]).unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["addon-kit", "api-utils", "app"]);
        assert_eq!(registry.paths().len(), 3);
        assert_eq!(
            registry.get("api-utils").unwrap().root_dir.as_deref(),
            Some(tmp.path().join("packages/api-utils").as_path())
        );
        assert_eq!(
            registry.get("app").unwrap().root_dir.as_deref(),
            Some(tmp.path())
        );
    }

    #[test]
    fn test_registry_without_packages_dir() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("solo").write(tmp.path());

        let registry = build_registry(tmp.path(), &[]).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("solo"));
    }

    #[test]
    fn test_extra_paths_are_loaded_and_deduplicated() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        let extra = tmp.path().join("vendor").join("jquery");
        PackageFixture::new("root").write(&root);
        PackageFixture::new("jquery").write(&extra);

        let extra_paths = vec![
            extra.clone(),
            tmp.path().join("vendor/./jquery"),
            root.join("../vendor/jquery"),
            root.clone(),
        ];
        let registry = build_registry(&root, &extra_paths).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.paths().len(), 2);
        assert!(registry.paths().contains(&extra));
    }

    #[test]
    fn test_unknown_fields_survive_registry() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("app").write(tmp.path());
        PackageFixture::new("api-utils")
            .field("version", serde_json::json!("0.5"))
            .field("contributors", serde_json::json!(["a", "b"]))
            .write(&tmp.path().join("packages/api-utils"));

        let registry = build_registry(tmp.path(), &[]).unwrap();

        let api = registry.get("api-utils").unwrap();
        assert_eq!(api.extra_field("version"), Some(&serde_json::json!("0.5")));
        assert_eq!(
            api.extra_field("contributors"),
            Some(&serde_json::json!(["a", "b"]))
        );
        assert!(registry.get("app").unwrap().extra.is_empty());
    }

    #[test]
    fn test_files_in_packages_dir_are_ignored() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("app").write(tmp.path());
        std::fs::create_dir_all(tmp.path().join("packages")).unwrap();
        std::fs::write(tmp.path().join("packages/README"), "not a package").unwrap();

        let registry = build_registry(tmp.path(), &[]).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_malformed_package_fails_whole_build() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("app").write(tmp.path());
        PackageFixture::new("good").write(&tmp.path().join("packages/good"));
        let bad = tmp.path().join("packages/bad");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(bad.join("package.json"), "{ not json").unwrap();

        let err = build_registry(tmp.path(), &[]).unwrap_err();
        match err {
            RegistryError::Manifest(ManifestError::Malformed { path, .. }) => {
                assert_eq!(path, bad.join("package.json"));
            }
            other => panic!("expected malformed manifest, got {other:?}"),
        }
    }

    #[test]
    fn test_package_dir_without_manifest_fails() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("app").write(tmp.path());
        std::fs::create_dir_all(tmp.path().join("packages/empty")).unwrap();

        let err = build_registry(tmp.path(), &[]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Manifest(ManifestError::Missing { .. })
        ));
    }

    #[test]
    fn test_missing_root_manifest_fails() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("lib").write(&tmp.path().join("packages/lib"));

        let err = build_registry(tmp.path(), &[]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Manifest(ManifestError::Missing { .. })
        ));
    }

    #[test]
    fn test_name_collision_last_sorted_path_wins() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("app").write(tmp.path());
        PackageFixture::new("dup")
            .lib(&["first"])
            .write(&tmp.path().join("packages/a-dup"));
        PackageFixture::new("dup")
            .lib(&["second"])
            .write(&tmp.path().join("packages/b-dup"));

        let registry = build_registry(tmp.path(), &[]).unwrap();

        // Both directories were loaded, one entry survives
        assert_eq!(registry.paths().len(), 3);
        assert_eq!(registry.len(), 2);

        let dup = registry.get("dup").unwrap();
        assert_eq!(dup.lib, vec!["second"]);
        assert_eq!(dup.root(), tmp.path().join("packages/b-dup"));
    }

    #[test]
    fn test_require_unknown_package() {
        let registry = PackageRegistry::new();

        let err = registry.require("missing", Some("app")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnknownPackage { ref package, .. } if package == "missing"
        ));
    }
}
