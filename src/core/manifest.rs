//! `package.json` manifest parsing and schema.
//!
//! Every package directory carries one manifest naming the package, its
//! dependencies, the directories it exposes and any extension hooks.
//! Fields this crate does not understand are kept in [`Manifest::extra`]
//! and written back out untouched.

use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic as MietteDiagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Conventional manifest filename inside a package directory.
pub const MANIFEST_NAME: &str = "package.json";

/// Error loading a single manifest.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    /// The manifest file is absent or could not be read.
    #[error("could not read manifest: {}", .path.display())]
    #[diagnostic(code(manifold::manifest::missing))]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest file exists but its content does not parse.
    #[error("malformed manifest {}: {detail}", .path.display())]
    #[diagnostic(code(manifold::manifest::malformed))]
    Malformed { path: PathBuf, detail: String },
}

impl ManifestError {
    /// Path of the offending manifest file.
    pub fn path(&self) -> &Path {
        match self {
            ManifestError::Missing { path, .. } | ManifestError::Malformed { path, .. } => path,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::Missing { path, source } => {
                Diagnostic::error(format!("could not read `{}`", MANIFEST_NAME))
                    .with_location(path)
                    .with_context(source.to_string())
                    .with_suggestion(suggestions::NO_MANIFEST)
            }
            ManifestError::Malformed { path, detail } => {
                Diagnostic::error(format!("malformed `{}`", MANIFEST_NAME))
                    .with_location(path)
                    .with_context(detail.clone())
                    .with_suggestion(suggestions::FIX_MANIFEST)
            }
        }
    }
}

/// A parsed package manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Package name, unique within a registry
    pub name: String,

    /// Names of packages this one depends on, in declared order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Directories exposed as libraries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lib: Vec<String>,

    /// Directories exposed as test resources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<String>,

    /// Resource suffix naming the module loader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,

    /// Directories added to the extension search path
    #[serde(default, rename = "python-lib", skip_serializing_if = "Vec::is_empty")]
    pub python_lib: Vec<String>,

    /// Extension identifiers invoked for this package
    #[serde(
        default,
        rename = "python-plugins",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub python_plugins: Vec<String>,

    /// Directory the manifest was loaded from. Set by the registry builder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,

    /// Fields not recognised here, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Manifest {
    /// Create a bare manifest with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Manifest {
            name: name.into(),
            dependencies: Vec::new(),
            lib: Vec::new(),
            tests: Vec::new(),
            loader: None,
            python_lib: Vec::new(),
            python_plugins: Vec::new(),
            root_dir: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Load the manifest inside `dir`.
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join(MANIFEST_NAME);
        let content = std::fs::read(&path).map_err(|source| ManifestError::Missing {
            path: path.clone(),
            source,
        })?;

        Self::parse(&content, &path)
    }

    /// Parse manifest content read from `path`.
    ///
    /// Content that is not valid UTF-8 is malformed, not missing.
    pub fn parse(content: impl AsRef<[u8]>, path: &Path) -> Result<Self, ManifestError> {
        serde_json::from_slice(content.as_ref()).map_err(|e| ManifestError::Malformed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// The package root, falling back to `.` for manifests not yet attached.
    pub fn root(&self) -> &Path {
        self.root_dir.as_deref().unwrap_or(Path::new("."))
    }

    /// Set the directory this manifest was loaded from.
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Look up a field this crate does not interpret.
    pub fn extra_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Read the manifest in `dir_path`.
///
/// The returned record has no `root_dir`; attaching it is the caller's job.
pub fn load_manifest(dir_path: &Path) -> Result<Manifest, ManifestError> {
    tracing::debug!("loading manifest from {}", dir_path.display());
    Manifest::load(dir_path)
}
