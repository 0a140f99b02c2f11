//! External Maven build invocation.
//!
//! Two blocking calls: `versions:set` writes the generated version into
//! the reactor, then `clean install` produces the application cluster.
//! Non-zero exit from either aborts the whole run.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub skip_tests: bool,
    pub offline: bool,
}

/// Stamp the generated version into the Maven reactor.
pub fn set_version(project_root: &Path, version: &str) -> Result<()> {
    let args = [
        "versions:set".to_string(),
        format!("-DnewVersion={version}"),
        "-DgenerateBackupPoms=false".to_string(),
    ];
    run_mvn(project_root, &args)
}

/// Run the full `clean install` build.
pub fn build(project_root: &Path, opts: BuildOptions) -> Result<()> {
    let mut args = vec!["clean".to_string(), "install".to_string()];
    if opts.skip_tests {
        args.push("-DskipTests".to_string());
    }
    if opts.offline {
        args.push("-o".to_string());
    }
    // One build thread per core; Maven coordinates the parallelism.
    args.push("-T".to_string());
    args.push("1C".to_string());
    run_mvn(project_root, &args)
}

fn run_mvn(dir: &Path, args: &[String]) -> Result<()> {
    log::debug!("mvn {}", args.join(" "));
    let status = Command::new("mvn")
        .args(args)
        .current_dir(dir)
        .status()
        .context("Failed to run mvn (is Maven on PATH?)")?;

    if !status.success() {
        bail!("mvn {} failed", args.first().map_or("", String::as_str));
    }
    Ok(())
}
