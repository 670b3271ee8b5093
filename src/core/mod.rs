//! Core data structures for manifold.
//!
//! This module contains the foundational types used throughout manifold:
//! - Package manifests and their loader
//! - The package registry built from a root directory

pub mod manifest;
pub mod registry;

pub use manifest::{load_manifest, Manifest, ManifestError, MANIFEST_NAME};
pub use registry::{build_registry, PackageRegistry, RegistryError, PACKAGES_DIR};
