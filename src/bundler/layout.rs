//! Deterministic output paths for a release.

use super::{Packaging, Settings, TargetTriple};
use crate::metadata::ResolvedRelease;
use std::path::PathBuf;

/// Directory under the cargo target directory holding staging dirs and archives.
pub const DIST_DIR: &str = "dist";

/// Directory under the cargo target directory holding installers.
pub const WIX_DIR: &str = "wix";

/// Every path a run reads or writes, derived from (product, version, target).
///
/// ```text
/// <target-dir>/<triple>/release/<binary>            compiled binary
/// <target-dir>/dist/<product>-<version>-<triple>/   staging directory
/// <target-dir>/dist/<product>-<version>-<triple>.tar.gz
/// <target-dir>/wix/<product>-<triple>.msi
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseLayout {
    product_name: String,
    binary_name: String,
    version: String,
    target: TargetTriple,
    target_directory: PathBuf,
}

impl ReleaseLayout {
    /// Creates the layout for a resolved release.
    pub fn new(settings: &Settings, release: &ResolvedRelease) -> Self {
        Self {
            product_name: settings.product_name().to_string(),
            binary_name: settings.binary_name().to_string(),
            version: release.version.clone(),
            target: settings.target().clone(),
            target_directory: release.target_directory.clone(),
        }
    }

    /// `<product>-<version>-<triple>`, the staging directory and archive stem.
    pub fn release_name(&self) -> String {
        format!("{}-{}-{}", self.product_name, self.version, self.target)
    }

    /// Root for staging directories and archives.
    pub fn dist_root(&self) -> PathBuf {
        self.target_directory.join(DIST_DIR)
    }

    /// Staging directory, recreated empty on every run.
    pub fn staging_dir(&self) -> PathBuf {
        self.dist_root().join(self.release_name())
    }

    /// Where cargo leaves the release binary for the target.
    pub fn compiled_binary(&self) -> PathBuf {
        self.target_directory
            .join(self.target.as_str())
            .join("release")
            .join(self.binary_file_name())
    }

    /// Binary file name for the target (`.exe` suffix on Windows).
    pub fn binary_file_name(&self) -> String {
        self.target.executable_name(&self.binary_name)
    }

    /// Archive artifact path.
    pub fn archive_path(&self) -> PathBuf {
        self.dist_root().join(format!("{}.tar.gz", self.release_name()))
    }

    /// Installer artifact path.
    pub fn installer_path(&self) -> PathBuf {
        self.target_directory
            .join(WIX_DIR)
            .join(format!("{}-{}.msi", self.product_name, self.target))
    }

    /// Artifact path for a packaging family.
    pub fn artifact_path(&self, packaging: Packaging) -> PathBuf {
        match packaging {
            Packaging::Archive => self.archive_path(),
            Packaging::Installer => self.installer_path(),
        }
    }
}
