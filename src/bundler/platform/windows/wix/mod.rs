//! Windows MSI installer creation.
//!
//! Produces `target/wix/<product>-<triple>.msi` with the WiX Toolset through
//! the `cargo wix` subcommand. The installer puts the binary under Program
//! Files and appends its directory to the system `PATH`.
//!
//! # Module Organization
//!
//! - `template` - WiX source template
//! - `source` - `wix/main.wxs` generation from the template
//! - `build` - `cargo wix` execution

mod build;
mod source;
mod template;

use crate::bundler::{
    InstallerError, ReleaseLayout, Settings, builder::tool_detection, error::ErrorExt,
};
use std::path::PathBuf;

/// Bundles the built binary into an MSI installer.
///
/// # Process
///
/// 1. Check that `cargo wix` is installed
/// 2. Make sure `wix/main.wxs` exists next to the manifest
/// 3. Compile the installer with `cargo wix --no-build`
/// 4. Confirm the installer landed at the expected path
pub async fn bundle_project(
    settings: &Settings,
    layout: &ReleaseLayout,
) -> Result<PathBuf, InstallerError> {
    log::info!("Building MSI installer for {}", settings.product_name());

    tool_detection::detect_cargo_wix(settings.cargo())
        .await
        .map_err(|reason| InstallerError::ToolchainUnavailable { reason })?;

    source::ensure_wxs(settings).await?;

    let installer_path = layout.installer_path();
    build::run_cargo_wix(settings, &installer_path).await?;

    let written = tokio::fs::try_exists(&installer_path)
        .await
        .fs_context("checking for installer", &installer_path)?;
    if !written {
        return Err(InstallerError::MissingOutput {
            path: installer_path,
        });
    }

    log::info!("✓ Created MSI installer: {}", installer_path.display());

    Ok(installer_path)
}
