//! Incremental-build gate.
//!
//! Compares the newest modification time among watched source files
//! against the timestamp recorded after the previous successful build.
//! Advisory only: the caller must additionally check that the previous
//! build output still exists before skipping Maven.

use crate::packager::cache;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use walkdir::WalkDir;

const TIMESTAMP_FILE: &str = "last-build";

/// File extensions that can affect the Maven build output.
pub const WATCHED_EXTENSIONS: &[&str] = &["java", "xml", "properties", "form"];

/// Directories never scanned for source changes.
const SKIPPED_DIRS: &[&str] = &["target", "build", ".git"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Changed,
    Unchanged,
}

/// Answer whether any watched source changed since the recorded build.
///
/// A missing or unparsable timestamp file always answers `Changed`.
pub fn check(project_root: &Path, cache_dir: &Path) -> Result<SourceState> {
    let Some(recorded) = cache::read(cache_dir, TIMESTAMP_FILE) else {
        return Ok(SourceState::Changed);
    };
    let Ok(recorded) = recorded.parse::<DateTime<Utc>>() else {
        log::warn!("unreadable last-build timestamp, forcing rebuild");
        return Ok(SourceState::Changed);
    };

    for entry in WalkDir::new(project_root)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_watched(entry.path()) {
            continue;
        }
        let mtime: DateTime<Utc> = entry.metadata()?.modified()?.into();
        if mtime > recorded {
            log::debug!("changed since last build: {}", entry.path().display());
            return Ok(SourceState::Changed);
        }
    }
    Ok(SourceState::Unchanged)
}

/// Record "now" as the last successful build time.
pub fn record(cache_dir: &Path) -> Result<()> {
    cache::write(cache_dir, TIMESTAMP_FILE, &Utc::now().to_rfc3339())
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_watched(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext))
}
