//! Extension invocation.
//!
//! Packages may declare `python-lib` directories and `python-plugins`
//! identifiers. For each package in a dependency closure the directories are
//! added to a caller-owned [`ModuleLoader`] and every identifier is resolved
//! through it and called with the package root and the caller's options.
//!
//! Resolution goes through an explicit registry supplied by the host, so
//! this crate never loads code by name and never touches process-wide state.

pub mod registry;
pub mod trait_def;

pub use registry::ExtensionRegistry;
pub use trait_def::{Extension, ExtensionOptions, ModuleLoader};

use anyhow::Result;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::PackageRegistry;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error resolving an extension identifier.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ExtensionError {
    #[error("extension `{id}` declared by `{package}` is not registered")]
    #[diagnostic(
        code(manifold::extension::not_registered),
        help("register the extension with the host's ExtensionRegistry")
    )]
    NotRegistered { id: String, package: String },
}

impl ExtensionError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ExtensionError::NotRegistered { id, package } => {
                Diagnostic::error(format!("extension `{}` is not registered", id))
                    .with_context(format!("declared in `python-plugins` of `{}`", package))
                    .with_suggestion(suggestions::EXTENSION_NOT_REGISTERED)
            }
        }
    }
}

/// Run the extensions declared by every package in `deps`.
///
/// Packages are processed in `deps` order. For each one its `python-lib`
/// directories are added to `loader` first, then its `python-plugins` are
/// invoked in declared order with `(root_dir, options)`.
///
/// Unknown packages fail with [`ResolveError`](crate::resolver::ResolveError)
/// and unregistered identifiers with [`ExtensionError`]. An error returned by
/// an extension is propagated as-is and stops the remaining invocations.
pub fn invoke_extensions<L>(
    registry: &PackageRegistry,
    deps: &[String],
    loader: &mut L,
    options: &ExtensionOptions,
) -> Result<()>
where
    L: ModuleLoader + ?Sized,
{
    for dep in deps {
        let manifest = registry.require(dep, None)?;
        let root_dir = manifest.root();

        for dirname in &manifest.python_lib {
            loader.add_search_dir(root_dir.join(dirname));
        }

        for id in &manifest.python_plugins {
            let extension = loader.load(id).ok_or_else(|| ExtensionError::NotRegistered {
                id: id.clone(),
                package: manifest.name.clone(),
            })?;

            tracing::debug!("invoking extension `{}` for `{}`", id, manifest.name);
            extension.init(root_dir, options)?;
        }
    }

    Ok(())
}
