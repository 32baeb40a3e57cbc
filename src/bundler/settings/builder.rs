//! Builder for constructing Settings.

use super::{PackageSettings, Settings, TargetTriple};
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    manifest_path: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    target: Option<TargetTriple>,
    cargo: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the product manifest (`Cargo.toml`).
    ///
    /// Relative paths are made absolute against the current directory.
    ///
    /// Default: `Cargo.toml`
    pub fn manifest_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets product metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets target triple.
    ///
    /// Default: host-family default, see [`TargetTriple::host_default`]
    pub fn target(mut self, target: TargetTriple) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the cargo executable.
    ///
    /// Default: `cargo` from `PATH`
    pub fn cargo<P: AsRef<Path>>(mut self, cargo: P) -> Self {
        self.cargo = Some(cargo.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `package_settings` is missing, names an empty
    /// product or binary, or the manifest path cannot be made absolute.
    pub fn build(self) -> Result<Settings> {
        let package = self
            .package_settings
            .ok_or_else(|| CliError::MissingArgument {
                argument: "package_settings".to_string(),
            })?;

        if package.product_name.trim().is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "product name cannot be empty".to_string(),
            }
            .into());
        }
        if package.binary_name.trim().is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "binary name cannot be empty".to_string(),
            }
            .into());
        }

        let manifest_path = self
            .manifest_path
            .unwrap_or_else(|| PathBuf::from("Cargo.toml"));
        let manifest_path =
            std::path::absolute(&manifest_path).map_err(|e| CliError::InvalidArguments {
                reason: format!("invalid manifest path {}: {}", manifest_path.display(), e),
            })?;

        // A relative cargo path would otherwise resolve against each child's
        // working directory; bare names are left for PATH lookup
        let cargo = match self.cargo {
            Some(cargo) if cargo.components().count() > 1 => std::path::absolute(&cargo)
                .map_err(|e| CliError::InvalidArguments {
                    reason: format!("invalid cargo path {}: {}", cargo.display(), e),
                })?,
            Some(cargo) => cargo,
            None => PathBuf::from("cargo"),
        };

        Ok(Settings::new(
            package,
            manifest_path,
            self.target.unwrap_or_else(TargetTriple::host_default),
            cargo,
        ))
    }
}
