//! Test utilities and mocks for unit tests.
//!
//! Provides package fixtures written to temporary directories, in-memory
//! registries and mock extensions that record how they were invoked.

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::builder::extension::{Extension, ExtensionOptions};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock extension that records every `(root_dir, options)` it receives.
///
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingExtension {
    calls: Arc<Mutex<Vec<(PathBuf, ExtensionOptions)>>>,
}

impl RecordingExtension {
    /// Create a recorder with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls so far.
    pub fn calls(&self) -> Vec<(PathBuf, ExtensionOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Extension for RecordingExtension {
    fn init(&self, root_dir: &Path, options: &ExtensionOptions) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((root_dir.to_path_buf(), options.clone()));
        Ok(())
    }
}

/// Mock extension whose entry point always fails.
#[derive(Debug, Clone)]
pub struct FailingExtension {
    message: String,
}

impl FailingExtension {
    /// Create an extension failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        FailingExtension {
            message: message.into(),
        }
    }
}

impl Extension for FailingExtension {
    fn init(&self, _root_dir: &Path, _options: &ExtensionOptions) -> Result<()> {
        Err(anyhow!("{}", self.message))
    }
}
