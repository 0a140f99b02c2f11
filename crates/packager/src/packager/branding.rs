//! Branding token resolver.
//!
//! The Maven descriptor carries the product identifier as
//! `<properties><brandingToken>...</brandingToken></properties>`. The
//! token names the output cluster, the branding archive and the
//! launcher `.conf` file.

use anyhow::{Context, Result};
use std::path::Path;

/// Resolve the branding token from the descriptor.
///
/// A missing descriptor or an absent/empty property falls back to
/// `fallback`; a descriptor that exists but does not parse is fatal.
pub fn resolve(descriptor: &Path, fallback: &str) -> Result<String> {
    if !descriptor.exists() {
        log::warn!(
            "descriptor {} not found, using branding token `{fallback}`",
            descriptor.display()
        );
        return Ok(fallback.to_string());
    }

    let text = std::fs::read_to_string(descriptor)
        .with_context(|| format!("Failed to read {}", descriptor.display()))?;
    let doc = roxmltree::Document::parse(&text)
        .with_context(|| format!("Failed to parse {}", descriptor.display()))?;

    let token = doc
        .descendants()
        .find(|n| n.has_tag_name("properties"))
        .into_iter()
        .flat_map(|props| props.children())
        .find(|n| n.has_tag_name("brandingToken"))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match token {
        Some(t) => Ok(t.to_string()),
        None => {
            log::warn!("no brandingToken in descriptor, using `{fallback}`");
            Ok(fallback.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_pom(dir: &Path, properties: &str) -> std::path::PathBuf {
        let path = dir.join("pom.xml");
        let pom = format!(
            "<project><artifactId>application</artifactId>{properties}</project>"
        );
        std::fs::write(&path, pom).unwrap();
        path
    }

    #[test]
    fn test_reads_branding_token() {
        let dir = tempfile::tempdir().unwrap();
        let pom = write_pom(
            dir.path(),
            "<properties><brandingToken> demo </brandingToken></properties>",
        );
        assert_eq!(resolve(&pom, "app").unwrap(), "demo");
    }

    #[test]
    fn test_missing_property_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let pom = write_pom(dir.path(), "<properties></properties>");
        assert_eq!(resolve(&pom, "app").unwrap(), "app");
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert_eq!(resolve(Path::new("no-such-pom.xml"), "app").unwrap(), "app");
    }

    #[test]
    fn test_broken_descriptor_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pom.xml");
        std::fs::write(&path, "<project><properties>").unwrap();
        assert!(resolve(&path, "app").is_err());
    }
}
