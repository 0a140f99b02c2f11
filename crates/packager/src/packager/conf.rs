//! Launcher configuration token injector.
//!
//! The launcher reads a flat `key="value"` text file. Two keys carry
//! the startup flags: `default_options` and the legacy alias
//! `netbeans_default_options`. Every required flag must appear in both;
//! flags already present (substring match) are never duplicated, and
//! existing content is never reordered.

use crate::packager::paths;
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::path::Path;

/// Recognized keys, patched independently.
const KEYS: [&str; 2] = ["default_options", "netbeans_default_options"];

/// Header written when the document has to be created from scratch.
const HEADER: &str = "# Launcher configuration. Generated by the packager; edit with care.\n";

/// Candidate locations of the `.conf` file inside the staged tree, in
/// lookup order. The first is also the canonical creation path.
pub fn candidate_paths(branding: &str) -> Vec<String> {
    vec![
        format!("etc/{branding}.conf"),
        format!("{branding}/etc/{branding}.conf"),
    ]
}

/// Ensure every required token is present under both recognized keys.
///
/// Returns `true` if the document was created or rewritten. No write
/// happens when every token is already present in both keys.
pub fn inject(staging: &Path, candidates: &[String], required: &[String]) -> Result<bool> {
    let Some(path) = paths::first_existing(staging, candidates) else {
        let canonical = staging.join(
            candidates
                .first()
                .context("No candidate conf path configured")?,
        );
        if let Some(parent) = canonical.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let joined = required.join(" ");
        let mut doc = String::from(HEADER);
        for key in KEYS {
            doc.push_str(&format!("{key}=\"{joined}\"\n"));
        }
        std::fs::write(&canonical, doc)
            .with_context(|| format!("Failed to create {}", canonical.display()))?;
        log::debug!("created {}", canonical.display());
        return Ok(true);
    };

    let original = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut doc = original.clone();
    for key in KEYS {
        doc = ensure_key(&doc, key, required)?;
    }

    if doc == original {
        return Ok(false);
    }
    std::fs::write(&path, doc).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Patch one `key="..."` line in place, or append the line if the key
/// is wholly missing. Only the first matching line is touched, so a
/// key is never defined twice.
fn ensure_key(doc: &str, key: &str, required: &[String]) -> Result<String> {
    let re = Regex::new(&format!(r#"(?m)^(\s*{key}\s*=\s*")([^"]*)(")"#))
        .context("Invalid conf key pattern")?;

    if re.is_match(doc) {
        let patched = re.replace(doc, |caps: &Captures| {
            let mut value = caps[2].to_string();
            for token in required {
                if !value.contains(token.as_str()) {
                    if !value.is_empty() && !value.ends_with(' ') {
                        value.push(' ');
                    }
                    value.push_str(token);
                }
            }
            format!("{}{}{}", &caps[1], value, &caps[3])
        });
        return Ok(patched.into_owned());
    }

    let mut doc = doc.to_string();
    if !doc.is_empty() && !doc.ends_with('\n') {
        doc.push('\n');
    }
    doc.push_str(&format!("{key}=\"{}\"\n", required.join(" ")));
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn write_conf(dir: &Path, content: &str) -> std::path::PathBuf {
        std::fs::create_dir_all(dir.join("etc")).unwrap();
        let path = dir.join("etc/demo.conf");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_appends_missing_tokens_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_conf(dir.path(), "default_options=\"-Xmx512m\"\n");

        let changed = inject(
            dir.path(),
            &candidate_paths("demo"),
            &tokens(&["-Xmx512m", "-Dfoo=1"]),
        )
        .unwrap();

        assert!(changed);
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains("default_options=\"-Xmx512m -Dfoo=1\""));
        // The alias key was missing entirely, so it is appended in full
        assert!(doc.contains("netbeans_default_options=\"-Xmx512m -Dfoo=1\""));
    }

    #[test]
    fn test_fully_present_is_byte_for_byte_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let content = "# hand-written\n\
                       default_options=\"-Xmx512m -Dfoo=1\"\n\
                       netbeans_default_options=\"-Dfoo=1 -Xmx512m\"\n";
        let path = write_conf(dir.path(), content);

        let changed = inject(
            dir.path(),
            &candidate_paths("demo"),
            &tokens(&["-Xmx512m", "-Dfoo=1"]),
        )
        .unwrap();

        assert!(!changed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_empty_document_gets_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_conf(dir.path(), "");

        inject(dir.path(), &candidate_paths("demo"), &tokens(&["a", "b"])).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert_eq!(doc, "default_options=\"a b\"\nnetbeans_default_options=\"a b\"\n");
    }

    #[test]
    fn test_rest_of_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let content = "# comment stays\n\
                       jdkhome=\"/opt/jdk\"\n\
                       default_options=\"-Xms64m\"\n\
                       netbeans_default_options=\"-Xms64m\"\n\
                       extra_clusters=\"\"\n";
        let path = write_conf(dir.path(), content);

        inject(dir.path(), &candidate_paths("demo"), &tokens(&["-Dbar=2"])).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.starts_with("# comment stays\njdkhome=\"/opt/jdk\"\n"));
        assert!(doc.contains("default_options=\"-Xms64m -Dbar=2\""));
        assert!(doc.contains("netbeans_default_options=\"-Xms64m -Dbar=2\""));
        assert!(doc.ends_with("extra_clusters=\"\"\n"));
    }

    #[test]
    fn test_missing_document_is_created_with_header() {
        let dir = tempfile::tempdir().unwrap();

        let changed =
            inject(dir.path(), &candidate_paths("demo"), &tokens(&["a", "b"])).unwrap();

        assert!(changed);
        let doc = std::fs::read_to_string(dir.path().join("etc/demo.conf")).unwrap();
        assert!(doc.starts_with('#'));
        assert!(doc.contains("default_options=\"a b\"\n"));
        assert!(doc.contains("netbeans_default_options=\"a b\"\n"));
    }

    #[test]
    fn test_trailing_space_in_value_does_not_double_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_conf(dir.path(), "default_options=\"-Xmx512m \"\n");

        inject(dir.path(), &candidate_paths("demo"), &tokens(&["-Dfoo=1"])).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains("default_options=\"-Xmx512m -Dfoo=1\""));
        assert!(!doc.contains("  "));
    }

    #[test]
    fn test_key_never_duplicated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_conf(dir.path(), "default_options=\"-Xmx1g\"\n");

        inject(dir.path(), &candidate_paths("demo"), &tokens(&["-Dx=1"])).unwrap();
        inject(dir.path(), &candidate_paths("demo"), &tokens(&["-Dx=1"])).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert_eq!(doc.matches("default_options").count(), 2); // key + alias
        assert!(doc.contains("default_options=\"-Xmx1g -Dx=1\""));
    }

    #[test]
    fn test_nested_candidate_path_wins_when_canonical_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("demo/etc");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("demo.conf"), "default_options=\"\"\n").unwrap();

        inject(dir.path(), &candidate_paths("demo"), &tokens(&["-Da=1"])).unwrap();

        // Patched in place, not created at the canonical path
        assert!(!dir.path().join("etc/demo.conf").exists());
        let doc = std::fs::read_to_string(nested.join("demo.conf")).unwrap();
        assert!(doc.contains("default_options=\"-Da=1\""));
    }
}
