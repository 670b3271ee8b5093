//! Build descriptor generation.
//!
//! The descriptor tells the runtime loader where every exposed directory
//! lives. Each directory gets a namespaced identifier
//! `{prefix}{package}-{dirname}`, an entry in `resources` pointing at its
//! absolute path, and a `resource://{identifier}/` entry at the front of
//! `rootPaths`, so packages processed later are searched first.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{Manifest, PackageRegistry};
use crate::resolver::errors::ResolveError;

/// URI scheme used for every resource reference.
pub const RESOURCE_SCHEME: &str = "resource://";

/// Output consumed by the runtime module loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    /// Namespaced identifier to absolute directory
    pub resources: BTreeMap<String, PathBuf>,

    /// Resolution prefixes, highest priority first
    #[serde(rename = "rootPaths")]
    pub root_paths: Vec<String>,

    /// Active loader module, if any package declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
}

/// Manifest section whose directories are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Lib,
    Tests,
}

impl BuildDescriptor {
    /// Expose every directory of `section` in `manifest`.
    fn add_section(&mut self, manifest: &Manifest, section: Section, prefix: &str) {
        let dirnames = match section {
            Section::Lib => &manifest.lib,
            Section::Tests => &manifest.tests,
        };

        for dirname in dirnames {
            let identifier = format!("{}{}-{}", prefix, manifest.name, dirname);
            self.root_paths
                .insert(0, format!("{}{}/", RESOURCE_SCHEME, identifier));
            self.resources
                .insert(identifier, manifest.root().join(dirname));
        }
    }

    /// Look up the directory behind a resource identifier.
    pub fn resource(&self, identifier: &str) -> Option<&PathBuf> {
        self.resources.get(identifier)
    }
}

/// Build the descriptor for `target` given its dependency closure `deps`.
///
/// The target's `tests` directories are exposed first, then the `lib`
/// directories of each entry of `deps` in the order supplied. If several
/// packages in `deps` declare a `loader`, the last one wins.
///
/// Pure data transformation: the filesystem is never consulted.
pub fn generate_descriptor(
    registry: &PackageRegistry,
    target: &str,
    deps: &[String],
    prefix: &str,
) -> Result<BuildDescriptor, ResolveError> {
    let mut descriptor = BuildDescriptor::default();

    let target_manifest = registry.require(target, None)?;
    descriptor.add_section(target_manifest, Section::Tests, prefix);

    for dep in deps {
        let manifest = registry.require(dep, None)?;
        descriptor.add_section(manifest, Section::Lib, prefix);

        if let Some(loader) = &manifest.loader {
            if let Some(previous) = &descriptor.loader {
                tracing::debug!("loader from `{}` overrides {}", dep, previous);
            }
            descriptor.loader = Some(format!("{}{}{}-{}", RESOURCE_SCHEME, prefix, dep, loader));
        }
    }

    Ok(descriptor)
}
