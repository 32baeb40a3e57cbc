//! Staging directory assembly.
//!
//! The staging directory holds exactly the files that get archived or
//! installed. It is wiped and rebuilt on every run, so reruns with the same
//! inputs produce the same tree and an interrupted run leaves nothing behind
//! that the next one would pick up.

use super::{ReleaseLayout, StagingError, error::ErrorExt, utils::fs};
use std::path::PathBuf;

/// Recreates the staging directory and copies the compiled binary into it.
///
/// Returns the staging directory path.
pub async fn assemble(layout: &ReleaseLayout) -> Result<PathBuf, StagingError> {
    let binary = layout.compiled_binary();
    let staging_dir = layout.staging_dir();

    // Checked before touching the staging dir so a failed build never
    // leaves an empty staging directory that looks like progress
    let built = tokio::fs::try_exists(&binary)
        .await
        .fs_context("checking for compiled binary", &binary)?;
    if !built {
        return Err(StagingError::MissingBinary { path: binary });
    }

    log::debug!("Recreating staging directory {}", staging_dir.display());
    fs::create_dir_all(&staging_dir, true).await?;

    let staged_binary = staging_dir.join(layout.binary_file_name());
    fs::copy_executable(&binary, &staged_binary).await?;

    log::info!("Staged {}", staged_binary.display());

    Ok(staging_dir)
}

/// Removes an artifact left by a previous run.
///
/// Runs before the build so a failing rerun cannot leave an old artifact at
/// the path a successful run would have written.
pub async fn discard_stale_artifact(artifact: &std::path::Path) -> Result<(), StagingError> {
    log::debug!("Removing previous artifact {}", artifact.display());
    fs::remove_file(artifact).await?;
    Ok(())
}
