//! Product metadata: manifest discovery and version resolution.
//!
//! The manifest is read directly for naming defaults (product, binary,
//! description). The authoritative version comes from `cargo metadata`, see
//! [`resolve_release`].

mod cargo;

pub use cargo::{ResolvedRelease, resolve_release, select_package};

use crate::bundler::PackageSettings;
use crate::error::{CliError, Result};
use std::path::Path;

/// Product metadata extracted from Cargo.toml
#[derive(Debug, Clone)]
pub struct CargoManifest {
    /// Package name from `[package]`
    pub name: String,

    /// Package description, defaulted when absent
    pub description: String,

    /// List of package authors
    pub authors: Vec<String>,

    /// Primary binary name (first `[[bin]]` or package name)
    pub binary_name: String,

    /// Publisher from `[package.metadata.bundle]`
    pub publisher: Option<String>,
}

impl CargoManifest {
    /// Converts the manifest into package settings.
    pub fn into_package_settings(self) -> PackageSettings {
        PackageSettings {
            product_name: self.name,
            binary_name: self.binary_name,
            description: self.description,
            authors: self.authors,
            publisher: self.publisher,
        }
    }
}

/// Load product metadata from Cargo.toml (single read + parse)
pub fn load_manifest(cargo_toml_path: &Path) -> Result<CargoManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path).map_err(|e| CliError::Manifest {
        path: cargo_toml_path.to_path_buf(),
        reason: format!("failed to read: {e}"),
    })?;

    parse_manifest(&manifest).map_err(|reason| {
        CliError::Manifest {
            path: cargo_toml_path.to_path_buf(),
            reason,
        }
        .into()
    })
}

/// Parses manifest text, returning a reason string on failure.
fn parse_manifest(manifest: &str) -> std::result::Result<CargoManifest, String> {
    let toml_value: toml::Value =
        toml::from_str(manifest).map_err(|e| format!("failed to parse: {e}"))?;

    let package = toml_value
        .get("package")
        .ok_or_else(|| "no [package] section".to_string())?;

    let name = package
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "missing 'name' in [package]".to_string())?
        .to_string();

    let description = package
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("Rust application")
        .to_string();

    let authors = package
        .get("authors")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    // Try [[bin]] section first, then the package name
    let binary_name = toml_value
        .get("bin")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|first| first.get("name"))
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| name.clone());

    let publisher = package
        .get("metadata")
        .and_then(|m| m.get("bundle"))
        .and_then(|b| b.get("publisher"))
        .and_then(|v| v.as_str())
        .map(String::from);

    Ok(CargoManifest {
        name,
        description,
        authors,
        binary_name,
        publisher,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_package_fields_and_defaults_binary_to_package_name() {
        let manifest = parse_manifest(
            r#"
            [package]
            name = "report-builder"
            version = "1.2.0"
            description = "CLI utility for configuring report paths."
            authors = ["Voss Lab <lab@example.edu>"]

            [package.metadata.bundle]
            publisher = "Voss Lab"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.name, "report-builder");
        assert_eq!(manifest.binary_name, "report-builder");
        assert_eq!(manifest.description, "CLI utility for configuring report paths.");
        assert_eq!(manifest.authors, vec!["Voss Lab <lab@example.edu>"]);
        assert_eq!(manifest.publisher.as_deref(), Some("Voss Lab"));
    }

    #[test]
    fn first_bin_target_wins() {
        let manifest = parse_manifest(
            r#"
            [package]
            name = "report-tools"
            version = "0.3.0"

            [[bin]]
            name = "report-builder"
            path = "src/main.rs"

            [[bin]]
            name = "report-admin"
            path = "src/admin.rs"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.binary_name, "report-builder");
        assert_eq!(manifest.description, "Rust application");
    }

    #[test]
    fn workspace_manifest_without_package_is_rejected() {
        let err = parse_manifest("[workspace]\nmembers = [\"a\"]\n").unwrap_err();
        assert!(err.contains("[package]"), "{err}");
    }

    #[test]
    fn load_manifest_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join("Cargo.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"), "{err}");
    }
}
