//! Extension registry - the default module loader.
//!
//! The host registers every extension it is willing to run under the
//! identifier packages use in `python-plugins`. Nothing is loaded
//! dynamically.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::builder::extension::trait_def::{Extension, ModuleLoader};

/// Registry of host-provided extensions.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Box<dyn Extension>>,
    search_dirs: Vec<PathBuf>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension under `id`, replacing any previous one.
    pub fn register(&mut self, id: impl Into<String>, extension: impl Extension + 'static) {
        self.extensions.insert(id.into(), Box::new(extension));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, id: impl Into<String>, extension: impl Extension + 'static) -> Self {
        self.register(id, extension);
        self
    }

    /// Check if an extension is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.extensions.contains_key(id)
    }

    /// Registered identifiers, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.extensions.keys().map(String::as_str)
    }

    /// Get the number of registered extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Forget every search directory added so far.
    pub fn reset_search_dirs(&mut self) {
        self.search_dirs.clear();
    }
}

impl ModuleLoader for ExtensionRegistry {
    fn add_search_dir(&mut self, dir: PathBuf) {
        self.search_dirs.push(dir);
    }

    fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    fn load(&self, id: &str) -> Option<&dyn Extension> {
        self.extensions.get(id).map(|e| e.as_ref())
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &ids)
            .field("search_dirs", &self.search_dirs)
            .finish()
    }
}
