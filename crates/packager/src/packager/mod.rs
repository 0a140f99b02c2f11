//! Packaging pipeline for the desktop application.
//!
//! Structure:
//! - `branding` - Branding token resolver (reads the Maven descriptor)
//! - `maven` - External Maven build invocation
//! - `incremental` - Source-change gate for skipping the build
//! - `stage` - Copies the build output into a clean staging tree
//! - `archive` - Version patching inside the branding archive
//! - `conf` - Launcher flag injection into the `.conf` file
//! - `runtime` - Trimmed runtime image via jlink
//! - `installer` - Inno Setup compiler invocation
//! - `pipeline` - Sequential orchestration + phase timings

pub mod archive;
pub mod branding;
pub mod cache;
pub mod conf;
pub mod config;
pub mod incremental;
pub mod installer;
pub mod maven;
pub mod paths;
pub mod pipeline;
pub mod runtime;
pub mod stage;

use anyhow::Result;

pub use pipeline::PhaseTiming;

/// Mode flags taken from the command line. No flag carries a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub fast: bool,
    pub incremental: bool,
    pub offline: bool,
    pub no_jre: bool,
    pub verbose: bool,
}

/// Run the whole pipeline: build, stage, patch, trim, package.
///
/// Returns the ordered per-phase timings for the summary printout.
pub fn package(opts: &Options) -> Result<Vec<PhaseTiming>> {
    let cfg = config::load()?;
    pipeline::run(&cfg, opts)
}
