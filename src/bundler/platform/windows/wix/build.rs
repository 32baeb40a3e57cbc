//! MSI compilation through `cargo wix`.

use crate::bundler::{InstallerError, Settings, error::ErrorExt, process};
use std::path::Path;
use tokio::process::Command;

/// Runs `cargo wix` against the already-built release binary.
///
/// `--no-build` keeps cargo-wix from rebuilding with its own profile, so the
/// installer wraps exactly the binary the build stage produced.
pub async fn run_cargo_wix(settings: &Settings, output_path: &Path) -> Result<(), InstallerError> {
    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating installer output directory", parent)?;
    }

    let mut command = Command::new(settings.cargo());
    command
        .arg("wix")
        .arg("--no-build")
        .arg("--nocapture")
        .args(["--package", settings.product_name()])
        .args(["--target", settings.target().as_str()])
        .arg("--output")
        .arg(output_path)
        .arg(settings.manifest_path())
        .current_dir(settings.manifest_dir());
    let command_line = process::describe(&command);

    log::info!("Running cargo wix...");
    log::debug!("Running: {}", command_line);

    let output = process::run_streaming(&mut command)
        .await
        .map_err(|source| InstallerError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(InstallerError::Failed {
            command: command_line,
            status: output.status,
            diagnostics: output.diagnostics(),
        });
    }

    Ok(())
}
