//! Extension and module loader trait definitions.

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Options handed to every extension entry point.
///
/// The shape is defined by the calling layer; this crate never inspects it.
pub type ExtensionOptions = serde_json::Value;

/// Host-supplied code invoked for packages that declare it.
pub trait Extension {
    /// Entry point, called once per declaring package with its root directory.
    fn init(&self, root_dir: &Path, options: &ExtensionOptions) -> Result<()>;
}

impl<F> Extension for F
where
    F: Fn(&Path, &ExtensionOptions) -> Result<()>,
{
    fn init(&self, root_dir: &Path, options: &ExtensionOptions) -> Result<()> {
        self(root_dir, options)
    }
}

/// Resolves extension identifiers to implementations.
///
/// A loader is owned by the caller and passed explicitly into
/// [`invoke_extensions`](super::invoke_extensions), so the search path it
/// accumulates lives exactly as long as the loader value.
pub trait ModuleLoader {
    /// Add a directory extensions may be resolved from.
    fn add_search_dir(&mut self, dir: PathBuf);

    /// Directories registered so far, in registration order.
    fn search_dirs(&self) -> &[PathBuf];

    /// Look up an extension by identifier.
    fn load(&self, id: &str) -> Option<&dyn Extension>;
}
