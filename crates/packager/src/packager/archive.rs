//! Archive entry locator & patcher.
//!
//! Finds a text resource inside the branding archive, rewrites the
//! version placeholder, and repacks the archive in place. The archive
//! is extracted to a scratch directory that is removed on every exit
//! path, and the repacked file replaces the original only after it has
//! been fully written. Repacking carries the original entry list in
//! its original order; no entries are added, dropped or reordered.

use crate::packager::paths;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Marker key expected inside the versioned resource.
pub const VERSION_MARKER: &str = "currentVersion";

/// Positional placeholder replaced with the generated version.
pub const VERSION_PLACEHOLDER: &str = "{0}";

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("archive not found: {0}")]
    ArchiveNotFound(PathBuf),

    #[error("failed to extract {path}")]
    ArchiveCorrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// No resource candidate exists inside the archive. Advisory.
    #[error("no versioned resource present in archive")]
    ResourceNotFound,

    /// The resource exists but lacks the marker key. Advisory.
    #[error("marker `{0}` absent from resource")]
    MarkerAbsent(String),

    #[error("failed to repack {path}")]
    RepackFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o error while patching archive")]
    Io(#[from] io::Error),
}

impl PatchError {
    /// Advisory errors are logged and the pipeline continues; the
    /// installer is simply built without the injected version.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::ResourceNotFound | Self::MarkerAbsent(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The resource was rewritten and the archive repacked.
    Patched,
    /// Marker present but no placeholder left; nothing was written.
    Unchanged,
}

/// Replace every placeholder occurrence in the first existing resource
/// candidate inside `archive`, repacking only if the content changed.
pub fn patch_versioned_resource(
    archive: &Path,
    candidates: &[String],
    marker: &str,
    placeholder: &str,
    replacement: &str,
) -> Result<PatchOutcome, PatchError> {
    if !archive.exists() {
        return Err(PatchError::ArchiveNotFound(archive.to_path_buf()));
    }

    // TempDir removes the scratch tree on drop, on every exit path.
    let scratch = TempDir::new()?;
    let entries = extract(archive, scratch.path())?;

    let resource = paths::first_existing(scratch.path(), candidates)
        .ok_or(PatchError::ResourceNotFound)?;

    let content = std::fs::read_to_string(&resource)?;
    if !content.contains(marker) {
        return Err(PatchError::MarkerAbsent(marker.to_string()));
    }

    let patched = content.replace(placeholder, replacement);
    if patched == content {
        return Ok(PatchOutcome::Unchanged);
    }

    std::fs::write(&resource, patched)?;
    repack(scratch.path(), archive, &entries)?;
    Ok(PatchOutcome::Patched)
}

/// Extract the archive into `dest` and return its entry names in
/// index order. The recorded list is what `repack` writes back, so the
/// rebuilt archive cannot reorder, drop or invent entries.
fn extract(archive: &Path, dest: &Path) -> Result<Vec<String>, PatchError> {
    let corrupt = |source| PatchError::ArchiveCorrupt {
        path: archive.to_path_buf(),
        source,
    };
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file).map_err(corrupt)?;
    let mut entries = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        entries.push(zip.by_index(index).map_err(corrupt)?.name().to_string());
    }
    zip.extract(dest).map_err(corrupt)?;
    Ok(entries)
}

/// Recompress the recorded entries into a temp file next to the
/// original, then rename it over the original. The original is never
/// left partially written, and the entry list comes out exactly as it
/// went in: same names, same order, no synthetic directory entries.
fn repack(scratch: &Path, archive: &Path, entries: &[String]) -> Result<(), PatchError> {
    let failed = |source| PatchError::RepackFailed {
        path: archive.to_path_buf(),
        source,
    };

    let parent = archive.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(parent)?;
    let mut zip = ZipWriter::new(tmp);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for name in entries {
        if name.ends_with('/') {
            zip.add_directory(name.as_str(), options)
                .map_err(|e| failed(io::Error::other(e)))?;
        } else {
            zip.start_file(name.as_str(), options)
                .map_err(|e| failed(io::Error::other(e)))?;
            let mut f = File::open(scratch.join(name)).map_err(failed)?;
            io::copy(&mut f, &mut zip).map_err(failed)?;
        }
    }

    let tmp = zip.finish().map_err(|e| failed(io::Error::other(e)))?;
    tmp.persist(archive).map_err(|e| failed(e.error))?;
    Ok(())
}
