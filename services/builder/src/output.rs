//! JSON dataset files

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Write `payload` as 2-space indented JSON, creating parent directories.
pub fn write_dataset<T: Serialize>(payload: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(payload).context("Failed to serialize dataset")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
