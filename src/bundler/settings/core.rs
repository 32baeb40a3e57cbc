//! Core Settings struct and implementations.

use super::{PackageSettings, Packaging, TargetTriple};
use std::path::{Path, PathBuf};

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder) and frozen for
/// the whole run. The version is not part of the settings: it is resolved
/// from `cargo metadata` by the first pipeline stage.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::{PackageSettings, SettingsBuilder, TargetTriple};
///
/// # fn example() -> release_packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .manifest_path("Cargo.toml")
///     .package_settings(PackageSettings {
///         product_name: "report-builder".into(),
///         binary_name: "report-builder".into(),
///         ..Default::default()
///     })
///     .target(TargetTriple::parse("aarch64-apple-darwin")?)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product metadata.
    package: PackageSettings,

    /// Absolute path to the product's `Cargo.toml`.
    manifest_path: PathBuf,

    /// Target triple being packaged.
    target: TargetTriple,

    /// Cargo executable used for metadata, builds and `cargo wix`.
    cargo: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the binary target name.
    pub fn binary_name(&self) -> &str {
        &self.package.binary_name
    }

    /// Returns the product metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the manifest path.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Directory containing the manifest.
    pub fn manifest_dir(&self) -> &Path {
        self.manifest_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Returns the target triple.
    pub fn target(&self) -> &TargetTriple {
        &self.target
    }

    /// Packaging family selected by the target.
    pub fn packaging(&self) -> Packaging {
        self.target.packaging()
    }

    /// Returns the cargo executable.
    pub fn cargo(&self) -> &Path {
        &self.cargo
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        manifest_path: PathBuf,
        target: TargetTriple,
        cargo: PathBuf,
    ) -> Self {
        Self {
            package,
            manifest_path,
            target,
            cargo,
        }
    }
}
