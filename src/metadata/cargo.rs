//! Version resolution through `cargo metadata`.

use crate::bundler::{MetadataError, Settings, process};
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;

/// Subset of `cargo metadata --format-version 1` output.
#[derive(Debug, Deserialize)]
struct CargoMetadata {
    packages: Vec<MetadataPackage>,
    target_directory: PathBuf,
}

/// One entry of the metadata package list.
#[derive(Debug, Deserialize)]
struct MetadataPackage {
    name: String,
    version: String,
}

/// Facts resolved once per run from project metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    /// Product version, validated as semver and otherwise opaque
    pub version: String,
    /// Cargo target directory; anchors every output path
    pub target_directory: PathBuf,
}

/// Resolves the product version and target directory.
///
/// Runs `cargo metadata --no-deps` against the product manifest and picks
/// the package named like the product. Read-only; nothing is built.
pub async fn resolve_release(settings: &Settings) -> Result<ResolvedRelease, MetadataError> {
    let mut command = Command::new(settings.cargo());
    command
        .args(["metadata", "--format-version", "1", "--no-deps", "--manifest-path"])
        .arg(settings.manifest_path());
    let command_line = process::describe(&command);

    log::debug!("Querying project metadata: {}", command_line);

    let output = command
        .output()
        .await
        .map_err(|source| MetadataError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(MetadataError::QueryFailed {
            command: command_line,
            status: output.status,
            diagnostics: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let metadata: CargoMetadata = serde_json::from_slice(&output.stdout)?;
    let version = select_package(metadata.package_versions(), settings.product_name())?;

    log::info!("Resolved {} version {}", settings.product_name(), version);

    Ok(ResolvedRelease {
        version,
        target_directory: metadata.target_directory,
    })
}

/// Picks the version of the package named `name` from `(name, version)` pairs.
///
/// Exactly one package must match: several matches are reported as
/// ambiguous rather than resolved by position.
pub fn select_package<'a>(
    packages: impl IntoIterator<Item = (&'a str, &'a str)>,
    name: &str,
) -> Result<String, MetadataError> {
    let matches: Vec<&str> = packages
        .into_iter()
        .filter(|(package, _)| *package == name)
        .map(|(_, version)| version)
        .collect();

    let version = match matches.as_slice() {
        [] => {
            return Err(MetadataError::PackageNotFound {
                name: name.to_string(),
            });
        }
        [version] => version.trim(),
        _ => {
            return Err(MetadataError::AmbiguousPackage {
                name: name.to_string(),
                count: matches.len(),
            });
        }
    };

    if version.is_empty() {
        return Err(MetadataError::InvalidVersion {
            name: name.to_string(),
            version: version.to_string(),
            reason: "version is empty".to_string(),
        });
    }

    semver::Version::parse(version).map_err(|e| MetadataError::InvalidVersion {
        name: name.to_string(),
        version: version.to_string(),
        reason: e.to_string(),
    })?;

    Ok(version.to_string())
}

impl CargoMetadata {
    fn package_versions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.packages
            .iter()
            .map(|p| (p.name.as_str(), p.version.as_str()))
    }
}
