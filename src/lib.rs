//! manifold - package manifest resolver and build descriptor generator.
//!
//! This crate discovers packages under a root directory, resolves the
//! dependency closure of a target and produces the build descriptor a
//! runtime loader uses to locate modules.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for manifold unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides package fixtures and mock extensions.
#[cfg(test)]
pub mod test_support;

pub use builder::{generate_descriptor, invoke_extensions, BuildDescriptor, ExtensionRegistry};
pub use core::{build_registry, load_manifest, Manifest, PackageRegistry};
pub use resolver::{resolve_dependencies, DependencyGraph, ResolveError};
pub use util::context::GlobalContext;
