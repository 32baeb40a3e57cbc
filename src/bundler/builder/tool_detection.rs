//! External tool detection and availability checking.
//!
//! Locates the toolchains the pipeline shells out to (cargo, cargo-wix)
//! before invoking them, so a missing tool is reported as such instead of
//! as an opaque spawn failure.

use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Resolves a program (bare name or path) to an executable on `PATH`.
pub fn locate(program: &Path) -> Option<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program.display(), path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program.display(), e);
            None
        }
    }
}

/// Finds a cargo subcommand installed next to the cargo executable, the
/// way `cargo install` lays out `$CARGO_HOME/bin`.
fn locate_beside(cargo: &Path, program: &str) -> Option<PathBuf> {
    let dir = locate(cargo)?.parent()?.to_path_buf();
    let found = which::which_in(program, Some(dir.as_os_str()), &dir).ok()?;
    log::debug!("Found {} next to cargo at: {}", program, found.display());
    Some(found)
}

/// Checks that the `cargo wix` subcommand is installed and runnable.
///
/// Looks next to `cargo` first, then on `PATH`. Returns the path of the
/// `cargo-wix` executable, or a reason suitable for an error message.
pub async fn detect_cargo_wix(cargo: &Path) -> Result<PathBuf, String> {
    let path = locate_beside(cargo, "cargo-wix")
        .or_else(|| locate(Path::new("cargo-wix")))
        .ok_or_else(|| {
            "cargo-wix not found next to cargo or in PATH. Install it with \
             `cargo install cargo-wix` and make sure the WiX Toolset is installed"
                .to_string()
        })?;

    match Command::new(cargo).args(["wix", "--version"]).output().await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            log::info!("✓ cargo-wix available: {}", version.trim());
            Ok(path)
        }
        Ok(output) => {
            log::warn!(
                "cargo-wix found at {} but `cargo wix --version` failed (exit code: {:?})",
                path.display(),
                output.status.code()
            );
            Err(format!(
                "`cargo wix --version` failed with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        }
        Err(e) => {
            log::warn!(
                "cargo-wix found at {} but {} failed to execute: {}",
                path.display(),
                cargo.display(),
                e
            );
            Err(format!("failed to run {} wix --version: {}", cargo.display(), e))
        }
    }
}
