//! Plain-text cache files under the cache directory.
//!
//! Holds the last-build timestamp and the recorded jlink version. Both
//! are single-line text files and safely deletable.

use anyhow::{Context, Result};
use std::path::Path;

/// Read a cache entry, `None` if missing or unreadable.
pub fn read(cache_dir: &Path, name: &str) -> Option<String> {
    std::fs::read_to_string(cache_dir.join(name))
        .ok()
        .map(|s| s.trim().to_string())
}

/// Write a cache entry, creating the cache directory if needed.
pub fn write(cache_dir: &Path, name: &str, value: &str) -> Result<()> {
    std::fs::create_dir_all(cache_dir)
        .with_context(|| format!("Failed to create {}", cache_dir.display()))?;
    let path = cache_dir.join(name);
    std::fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
}
