//! High-level operations.
//!
//! This module contains the implementation of manifold commands.

pub mod build;
pub mod resolve;
pub mod tree;

pub use build::{render_descriptor, write_descriptor};
pub use resolve::{load_registry, resolve_target, root_package_name, ResolveOptions, ResolvedTarget};
pub use tree::{render_tree, TreeOptions};
