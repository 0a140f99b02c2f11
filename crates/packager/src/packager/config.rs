//! Project layout and packaging constants.
//!
//! Everything has a default matching the repository layout; an optional
//! `packager.json` next to the descriptor overrides individual fields.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional override file at the project root.
pub const CONFIG_FILE: &str = "packager.json";

/// Launcher flags that must be present in the `.conf` file, in order.
const REQUIRED_TOKENS: &[&str] = &[
    "-J-Xms256m",
    "-J-Xmx2g",
    "-J-Dsun.java2d.d3d=false",
    "-J--add-opens=java.base/java.net=ALL-UNNAMED",
];

/// Modules linked into the trimmed runtime image.
const JLINK_MODULES: &[&str] = &[
    "java.base",
    "java.desktop",
    "java.logging",
    "java.naming",
    "java.prefs",
    "java.sql",
    "jdk.unsupported",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maven build descriptor read for the branding token.
    pub descriptor: PathBuf,
    /// Branding token used when the descriptor does not define one.
    pub branding_fallback: String,
    /// Major.minor prefix of the generated version string.
    pub version_base: String,
    /// Maven output directory; `{branding}` is substituted.
    pub build_output: String,
    /// Staging tree fed to the installer compiler.
    pub staging_dir: PathBuf,
    /// Cache directory (last-build timestamp, jlink version, jre image).
    pub cache_dir: PathBuf,
    /// Inno Setup definition script.
    pub installer_script: PathBuf,
    /// Installer AppId GUID, braced.
    pub app_id: String,
    pub required_tokens: Vec<String>,
    pub jlink_modules: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            descriptor: PathBuf::from("pom.xml"),
            branding_fallback: "app".to_string(),
            version_base: "2.1".to_string(),
            build_output: "application/target/{branding}".to_string(),
            staging_dir: PathBuf::from("build/staging"),
            cache_dir: PathBuf::from("build/cache"),
            installer_script: PathBuf::from("installer/app.iss"),
            app_id: "{C2A17E6B-4F0D-4E7A-9C3B-6D5F2A81B904}".to_string(),
            required_tokens: REQUIRED_TOKENS.iter().map(ToString::to_string).collect(),
            jlink_modules: JLINK_MODULES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Maven output directory for the given branding token.
    pub fn build_output_dir(&self, branding: &str) -> PathBuf {
        PathBuf::from(self.build_output.replace("{branding}", branding))
    }
}

/// Load `packager.json` if present, otherwise the defaults.
pub fn load() -> Result<Config> {
    load_from(Path::new(CONFIG_FILE))
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
