//! Inno Setup compiler invocation.
//!
//! The staged tree's total byte size is precomputed and handed to the
//! installer script as a preprocessor define, together with the version
//! and application identity. A missing script or a non-zero compiler
//! exit aborts the run.

use crate::packager::paths;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

pub struct InstallerJob<'a> {
    pub script: &'a Path,
    pub staging: &'a Path,
    pub version: &'a str,
    pub app_id: &'a str,
    pub app_name: &'a str,
    pub skip_jre: bool,
}

/// Compile the installer from the staged tree.
pub fn run(job: &InstallerJob<'_>) -> Result<()> {
    if !job.script.exists() {
        bail!("installer script {} not found", job.script.display());
    }

    let size = paths::dir_size(job.staging)
        .with_context(|| format!("Failed to size {}", job.staging.display()))?;
    println!("  Staged payload: {:.1} MB", size as f64 / 1_000_000.0);

    let mut cmd = Command::new("iscc");
    cmd.arg(format!("/DAppVersion={}", job.version))
        .arg(format!("/DAppId={}", job.app_id))
        .arg(format!("/DAppName={}", job.app_name))
        .arg(format!("/DInstallSize={size}"));
    if job.skip_jre {
        cmd.arg("/DSkipJre=1");
    }
    cmd.arg(job.script);

    log::debug!("iscc /DAppVersion={} {}", job.version, job.script.display());
    let status = cmd
        .status()
        .context("Failed to run iscc (is the Inno Setup compiler on PATH?)")?;

    if !status.success() {
        bail!("iscc failed for {}", job.script.display());
    }
    Ok(())
}
