//! Sequential packaging pipeline.
//!
//! Each phase consumes the previous phase's output directory; a fatal
//! error anywhere aborts the run. Advisory conditions (missing branding
//! archive, absent marker, no jlink) are logged as warnings and the
//! pipeline continues with a degraded result.

use crate::packager::{
    archive, branding, conf, config::Config, incremental, installer, maven, paths, runtime,
    stage, Options,
};
use anyhow::Result;
use std::path::Path;
use std::time::{Duration, Instant};

/// One entry of the ordered timing summary.
pub struct PhaseTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Version string handed to Maven, the archive patcher and the
/// installer: `<base>.<yyyymmdd>`.
pub fn generate_version(base: &str) -> String {
    format!("{base}.{}", chrono::Local::now().format("%Y%m%d"))
}

/// Candidate locations of the branding archive inside the staged tree.
fn jar_candidates(branding: &str) -> Vec<String> {
    vec![
        format!("{branding}/core/locale/core_{branding}.jar"),
        format!("platform/core/locale/core_{branding}.jar"),
    ]
}

/// Candidate resource paths inside the archive, branded variant first.
fn resource_candidates(branding: &str) -> Vec<String> {
    vec![
        format!("org/netbeans/core/startup/Bundle_{branding}.properties"),
        "org/netbeans/core/startup/Bundle.properties".to_string(),
    ]
}

/// Run the whole pipeline and return the ordered phase timings.
pub fn run(cfg: &Config, opts: &Options) -> Result<Vec<PhaseTiming>> {
    let project_root = Path::new(".");
    let mut timings = Vec::new();

    println!("=== Packaging the application ===\n");
    if opts.verbose {
        println!("  staging: {}", cfg.staging_dir.display());
        println!("  cache:   {}", cfg.cache_dir.display());
        println!("  script:  {}", cfg.installer_script.display());
    }

    let brand = timed(&mut timings, "branding", || {
        branding::resolve(&cfg.descriptor, &cfg.branding_fallback)
    })?;
    let version = generate_version(&cfg.version_base);
    println!("Building {brand} {version}");

    let build_output = cfg.build_output_dir(&brand);
    timed(&mut timings, "build", || {
        // Skipping requires both an advisory "unchanged" answer and a
        // previous output to reuse.
        let may_skip = opts.incremental
            && build_output.exists()
            && incremental::check(project_root, &cfg.cache_dir)?
                == incremental::SourceState::Unchanged;
        if may_skip {
            println!("=== Build: no watched source changed, skipping Maven ===");
            return Ok(());
        }
        println!("=== Building with Maven ===");
        maven::set_version(project_root, &version)?;
        maven::build(
            project_root,
            maven::BuildOptions {
                skip_tests: opts.fast,
                offline: opts.offline,
            },
        )?;
        incremental::record(&cfg.cache_dir)
    })?;

    timed(&mut timings, "stage", || {
        println!("=== Staging build output ===");
        let copied = stage::stage(&build_output, &cfg.staging_dir)?;
        println!("  Staged {copied} files into {}", cfg.staging_dir.display());
        Ok(())
    })?;

    timed(&mut timings, "patch-archive", || {
        println!("=== Patching version into branding archive ===");
        patch_branding_archive(cfg, &brand, &version)
    })?;

    timed(&mut timings, "inject-conf", || {
        println!("=== Injecting launcher flags ===");
        let changed = conf::inject(
            &cfg.staging_dir,
            &conf::candidate_paths(&brand),
            &cfg.required_tokens,
        )?;
        if !changed {
            println!("  All required flags already present");
        }
        Ok(())
    })?;

    let jre_bundled = timed(&mut timings, "trim-runtime", || {
        if opts.no_jre {
            println!("=== Runtime image skipped (--no-jre) ===");
            return Ok(false);
        }
        println!("=== Building trimmed runtime image ===");
        runtime::trim(&cfg.staging_dir, &cfg.cache_dir, &cfg.jlink_modules)
    })?;

    timed(&mut timings, "installer", || {
        println!("=== Compiling installer ===");
        installer::run(&installer::InstallerJob {
            script: &cfg.installer_script,
            staging: &cfg.staging_dir,
            version: &version,
            app_id: &cfg.app_id,
            app_name: &brand,
            skip_jre: !jre_bundled,
        })
    })?;

    println!("\n=== Packaging complete ===");
    Ok(timings)
}

/// Locate the branding archive and patch the version placeholder.
/// A missing archive, missing resource or absent marker degrades the
/// installer (no version in the About text) but never aborts the run.
fn patch_branding_archive(cfg: &Config, brand: &str, version: &str) -> Result<()> {
    let Some(jar) = paths::first_existing(&cfg.staging_dir, &jar_candidates(brand)) else {
        log::warn!("branding archive not found in staging, version not injected");
        return Ok(());
    };

    match archive::patch_versioned_resource(
        &jar,
        &resource_candidates(brand),
        archive::VERSION_MARKER,
        archive::VERSION_PLACEHOLDER,
        version,
    ) {
        Ok(archive::PatchOutcome::Patched) => {
            println!("  Patched {}", jar.display());
            Ok(())
        }
        Ok(archive::PatchOutcome::Unchanged) => {
            println!("  Archive already carries the version, nothing to do");
            Ok(())
        }
        Err(err) if err.is_advisory() => {
            log::warn!("{err}, version not injected");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn timed<T>(
    timings: &mut Vec<PhaseTiming>,
    name: &'static str,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let start = Instant::now();
    let result = f();
    timings.push(PhaseTiming {
        name,
        duration: start.elapsed(),
    });
    result
}
