//! Dataset discovery.
//!
//! A dataset is a single edge-list file. Commands accept either a file or
//! a directory; a directory contributes every regular `.txt` file directly
//! inside it, sorted by path so runs are reproducible.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// File extension recognised as an edge-list dataset.
pub const DATASET_EXTENSION: &str = "txt";

/// Resolve `path` into the list of dataset files it names.
///
/// # Errors
///
/// Fails if `path` does not exist or a directory cannot be listed.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("dataset path {} does not exist", path.display());
    }

    let mut found = Vec::new();
    let entries =
        std::fs::read_dir(path).with_context(|| format!("Failed to list {}", path.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", path.display()))?;
        let candidate = entry.path();
        let is_dataset = candidate
            .extension()
            .is_some_and(|ext| ext == DATASET_EXTENSION);
        if is_dataset && candidate.is_file() {
            found.push(candidate);
        }
    }

    found.sort();
    Ok(found)
}

/// Short display name for a dataset: its file stem.
#[must_use]
pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}
