//! Build descriptor synthesis and extension hooks.
//!
//! This module turns a resolved closure into the descriptor consumed by the
//! runtime loader and runs the extensions packages declare.

pub mod descriptor;
pub mod extension;

pub use descriptor::{generate_descriptor, BuildDescriptor, RESOURCE_SCHEME};
pub use extension::{
    invoke_extensions, Extension, ExtensionError, ExtensionOptions, ExtensionRegistry,
    ModuleLoader,
};
