//! # Application Packager
//!
//! Drives the Maven build of the desktop application and turns the
//! output into a distributable Windows installer.
//!
//! ## Usage
//!
//! ```bash
//! packager                  # Full build + package
//! packager --fast           # Skip the Maven test phase
//! packager --incremental    # Skip Maven entirely if no source changed
//! packager --offline        # Pass -o to Maven
//! packager --no-jre         # Skip the trimmed-runtime step
//! packager --verbose        # Debug logging + subprocess command lines
//! ```
//!
//! ## Pipeline
//!
//! branding -> build -> stage -> patch archive -> inject conf
//! -> trim runtime -> installer

use anyhow::Result;
use clap::Parser;

mod packager;

#[derive(Parser)]
#[command(name = "packager", about = "Builds and packages the desktop application installer")]
struct Cli {
    /// Skip the Maven test phase (-DskipTests)
    #[arg(long)]
    fast: bool,

    /// Skip the Maven build when no watched source changed since the last run
    #[arg(long)]
    incremental: bool,

    /// Run Maven in offline mode (-o)
    #[arg(long)]
    offline: bool,

    /// Do not build or bundle a trimmed runtime image
    #[arg(long)]
    no_jre: bool,

    /// Debug logging, including subprocess command lines
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let opts = packager::Options {
        fast: cli.fast,
        incremental: cli.incremental,
        offline: cli.offline,
        no_jre: cli.no_jre,
        verbose: cli.verbose,
    };

    let timings = packager::package(&opts)?;

    println!("\n=== Timing summary ===");
    for phase in &timings {
        println!("  {:16} {:>8.2}s", phase.name, phase.duration.as_secs_f64());
    }

    Ok(())
}
