//! Release build of the product binary.

use super::{BuildError, Settings, builder::tool_detection, process};
use tokio::process::Command;

/// Profile overrides applied to the release build to shrink the binary.
///
/// Passed as environment so the product's own `[profile.release]` needs no
/// changes.
pub const SIZE_PROFILE: [(&str, &str); 3] = [
    ("CARGO_PROFILE_RELEASE_LTO", "true"),
    ("CARGO_PROFILE_RELEASE_STRIP", "symbols"),
    ("CARGO_PROFILE_RELEASE_CODEGEN_UNITS", "1"),
];

/// Builds the product binary in release mode for the configured target.
///
/// Blocks until cargo exits. A missing target toolchain surfaces as a
/// non-zero cargo exit and is reported with cargo's diagnostics.
pub async fn build_release(settings: &Settings) -> Result<(), BuildError> {
    let cargo = tool_detection::locate(settings.cargo()).ok_or_else(|| {
        BuildError::ToolchainUnavailable {
            program: settings.cargo().display().to_string(),
        }
    })?;

    let mut command = Command::new(&cargo);
    command
        .arg("build")
        .arg("--release")
        .arg("--manifest-path")
        .arg(settings.manifest_path())
        .args(["--package", settings.product_name()])
        .args(["--bin", settings.binary_name()])
        .args(["--target", settings.target().as_str()])
        .envs(SIZE_PROFILE)
        .current_dir(settings.manifest_dir());
    let command_line = process::describe(&command);

    log::info!(
        "Building {} for {}",
        settings.binary_name(),
        settings.target()
    );
    log::debug!("Running: {}", command_line);

    let output = process::run_streaming(&mut command)
        .await
        .map_err(|source| BuildError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(BuildError::Failed {
            command: command_line,
            status: output.status,
            diagnostics: output.diagnostics(),
        });
    }

    Ok(())
}
