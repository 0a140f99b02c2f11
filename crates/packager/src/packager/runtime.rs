//! Trimmed runtime image via jlink.
//!
//! The image is linked into the cache directory and copied into the
//! staging tree, so a staging wipe does not throw the link work away.
//! The cached image is reused as long as the recorded `jlink --version`
//! output matches the current tool. Every failure here is advisory:
//! the installer is simply built without a bundled runtime.

use crate::packager::{cache, stage};
use anyhow::Result;
use std::path::Path;
use std::process::Command;

const VERSION_FILE: &str = "jlink-version";
const IMAGE_DIR: &str = "jre";

/// Link (or reuse) the trimmed runtime and copy it into `staging/jre`.
///
/// Returns `false` when no runtime could be produced; the caller
/// continues without one.
pub fn trim(staging: &Path, cache_dir: &Path, modules: &[String]) -> Result<bool> {
    let Some(current) = jlink_version() else {
        log::warn!("jlink not available, packaging without a trimmed runtime");
        return Ok(false);
    };

    let image = cache_dir.join(IMAGE_DIR);
    let recorded = cache::read(cache_dir, VERSION_FILE);

    if recorded.as_deref() == Some(current.as_str()) && image.exists() {
        println!("  Reusing cached runtime image ({current})");
    } else if !link(&image, modules) {
        log::warn!("jlink failed, packaging without a trimmed runtime");
        discard_partial_image(&image);
        return Ok(false);
    } else {
        cache::write(cache_dir, VERSION_FILE, &current)?;
    }

    stage::stage(&image, &staging.join(IMAGE_DIR))?;
    Ok(true)
}

fn link(image: &Path, modules: &[String]) -> bool {
    if image.exists() {
        if let Err(err) = std::fs::remove_dir_all(image) {
            log::warn!("could not clean previous runtime image: {err}");
            return false;
        }
    }

    let mut cmd = Command::new("jlink");
    cmd.arg("--add-modules")
        .arg(modules.join(","))
        .arg("--output")
        .arg(image)
        .args(["--no-header-files", "--no-man-pages", "--strip-debug", "--compress=2"]);
    log::debug!("jlink --add-modules {} --output {}", modules.join(","), image.display());

    matches!(cmd.status(), Ok(status) if status.success())
}

/// Best-effort cleanup. A half-written image must not satisfy the next
/// run's cache check, but failing to remove it stays advisory like the
/// rest of this phase.
fn discard_partial_image(image: &Path) {
    if image.exists() {
        if let Err(err) = std::fs::remove_dir_all(image) {
            log::warn!("could not remove partial runtime image: {err}");
        }
    }
}

fn jlink_version() -> Option<String> {
    let output = Command::new("jlink").arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}
