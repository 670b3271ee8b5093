//! Descriptor output.

use std::path::Path;

use anyhow::{Context, Result};

use crate::builder::BuildDescriptor;
use crate::util::fs::write_string;

/// Serialize a descriptor as pretty-printed JSON.
pub fn render_descriptor(descriptor: &BuildDescriptor) -> Result<String> {
    serde_json::to_string_pretty(descriptor).context("failed to serialize build descriptor")
}

/// Write a descriptor to `path`, creating parent directories.
pub fn write_descriptor(descriptor: &BuildDescriptor, path: &Path) -> Result<()> {
    let mut json = render_descriptor(descriptor)?;
    json.push('\n');
    write_string(path, &json)?;
    tracing::info!("Wrote build descriptor to {}", path.display());
    Ok(())
}
