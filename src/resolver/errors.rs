//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::PackageRegistry;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Maximum number of "did you mean" names attached to an error.
const MAX_SUGGESTIONS: usize = 3;

/// Error during dependency resolution or descriptor generation.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    /// A target or dependency name has no registry entry.
    #[error("package not found: `{package}`")]
    #[diagnostic(code(manifold::resolve::unknown_package))]
    UnknownPackage {
        package: String,
        /// The package whose `dependencies` named it, `None` for a target.
        required_by: Option<String>,
        suggestions: Vec<String>,
    },
}

impl ResolveError {
    /// Build an [`UnknownPackage`](ResolveError::UnknownPackage) error with
    /// suggestions drawn from `registry`.
    pub fn unknown_package(
        registry: &PackageRegistry,
        package: &str,
        required_by: Option<&str>,
    ) -> Self {
        ResolveError::UnknownPackage {
            package: package.to_string(),
            required_by: required_by.map(str::to_string),
            suggestions: similar_names(registry, package),
        }
    }

    /// Name of the missing package.
    pub fn package(&self) -> &str {
        match self {
            ResolveError::UnknownPackage { package, .. } => package,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnknownPackage {
                package,
                required_by,
                suggestions: similar,
            } => {
                let mut diag =
                    Diagnostic::error(format!("could not find package `{}`", package));

                if let Some(requirer) = required_by {
                    diag = diag.with_context(format!("required by `{}`", requirer));
                }

                if !similar.is_empty() {
                    diag = diag.with_context(format!(
                        "did you mean: {}?",
                        similar.join(", ")
                    ));
                }

                diag.with_suggestion("Check that the package name is spelled correctly")
                    .with_suggestion(suggestions::PACKAGE_NOT_FOUND)
                    .with_suggestion(suggestions::EXTRA_PATH)
            }
        }
    }
}

/// Registered names that contain `name` or are contained in it.
fn similar_names(registry: &PackageRegistry, name: &str) -> Vec<String> {
    let needle = name.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    registry
        .names()
        .filter(|candidate| {
            let candidate = candidate.to_lowercase();
            candidate.contains(&needle) || needle.contains(&candidate)
        })
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}
