//! Staging: copy the Maven output cluster into a clean tree.
//!
//! The staging tree is what the archive patcher, the conf injector and
//! the installer compiler all operate on. It is wiped and rebuilt on
//! every run.

use anyhow::{bail, Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Copy `build_output` into a freshly cleaned `staging` directory.
///
/// Returns the number of files copied.
pub fn stage(build_output: &Path, staging: &Path) -> Result<u64> {
    if !build_output.exists() {
        bail!(
            "build output {} not found (did the Maven build run?)",
            build_output.display()
        );
    }

    if staging.exists() {
        std::fs::remove_dir_all(staging)
            .with_context(|| format!("Failed to clean {}", staging.display()))?;
    }
    std::fs::create_dir_all(staging)?;

    let mut copied = 0;
    for entry in WalkDir::new(build_output) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(build_output)
            .context("Walked outside the build output")?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let dest = staging.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else {
            std::fs::copy(entry.path(), &dest)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_tree() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let staging = dst.path().join("staging");
        std::fs::create_dir_all(src.path().join("bin")).unwrap();
        std::fs::write(src.path().join("launcher.exe"), "exe").unwrap();
        std::fs::write(src.path().join("bin/app64.dll"), "dll").unwrap();

        let copied = stage(src.path(), &staging).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            std::fs::read_to_string(staging.join("bin/app64.dll")).unwrap(),
            "dll"
        );
    }

    #[test]
    fn test_cleans_previous_staging() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let staging = dst.path().join("staging");
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join("stale.txt"), "old").unwrap();
        std::fs::write(src.path().join("fresh.txt"), "new").unwrap();

        stage(src.path(), &staging).unwrap();
        assert!(!staging.join("stale.txt").exists());
        assert!(staging.join("fresh.txt").exists());
    }

    #[test]
    fn test_missing_output_is_fatal() {
        let dst = tempfile::tempdir().unwrap();
        assert!(stage(Path::new("no-such-output"), dst.path()).is_err());
    }
}
