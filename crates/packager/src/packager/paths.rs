//! Small filesystem helpers shared across the pipeline.

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Return the first candidate (relative to `base`) that exists.
///
/// Both the launcher `.conf` file and the branding archive are looked
/// up this way: an ordered candidate list, first hit wins.
pub fn first_existing(base: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|c| base.join(c))
        .find(|p| p.exists())
}

/// Total size in bytes of all regular files under `path`.
pub fn dir_size(path: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}
