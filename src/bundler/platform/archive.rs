//! Tarball creation for non-Windows targets.
//!
//! Packs the staging directory into `<release-name>.tar.gz` next to it. Entry
//! names are computed relative to the dist root, so the staging directory is
//! the archive's only top-level entry and the process working directory is
//! never touched.

use crate::bundler::{ArchiveError, ReleaseLayout, error::ErrorExt, utils::fs};
use flate2::{Compression, write::GzEncoder};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tar::HeaderMode;
use walkdir::WalkDir;

/// Archives the staging directory.
///
/// The archive is written to a `.partial` sibling and renamed into place only
/// once complete; on failure the partial file is removed and no archive is
/// left at the artifact path.
pub async fn bundle_project(layout: &ReleaseLayout) -> Result<PathBuf, ArchiveError> {
    let archive_path = layout.archive_path();
    let partial_path = partial_path(&archive_path);
    let dist_root = layout.dist_root();
    let release_name = layout.release_name();

    log::info!("Archiving {} into {}", release_name, archive_path.display());

    let written = {
        let partial_path = partial_path.clone();
        tokio::task::spawn_blocking(move || {
            write_tarball(&dist_root, &release_name, &partial_path)
        })
        .await
    };

    if let Err(e) = written.map_err(ArchiveError::from).and_then(|result| result) {
        fs::remove_file(&partial_path).await?;
        return Err(e);
    }

    tokio::fs::rename(&partial_path, &archive_path)
        .await
        .fs_context("moving archive into place", &archive_path)?;

    log::info!("✓ Created archive: {}", archive_path.display());

    Ok(archive_path)
}

/// `<archive>.partial`
fn partial_path(archive_path: &Path) -> PathBuf {
    let mut name = archive_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    archive_path.with_file_name(name)
}

/// Writes `dist_root/release_name` as a gzip-compressed tarball to `output`.
///
/// Entries are appended in sorted order with deterministic headers, so the
/// same staged files always produce the same bytes.
fn write_tarball(dist_root: &Path, release_name: &str, output: &Path) -> Result<(), ArchiveError> {
    let staging_dir = dist_root.join(release_name);

    let file = File::create(output).fs_context("creating archive", output)?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
    let mut builder = tar::Builder::new(encoder);
    builder.mode(HeaderMode::Deterministic);
    builder.follow_symlinks(false);

    for entry in WalkDir::new(&staging_dir).sort_by_file_name() {
        let entry = entry?;
        let name = entry
            .path()
            .strip_prefix(dist_root)
            .unwrap_or_else(|_| entry.path());
        log::debug!("  adding {}", name.display());
        builder
            .append_path_with_name(entry.path(), name)
            .fs_context("adding to archive", entry.path())?;
    }

    let encoder = builder
        .into_inner()
        .fs_context("finishing tar stream", output)?;
    let mut writer = encoder
        .finish()
        .fs_context("finishing gzip stream", output)?;
    writer.flush().fs_context("writing archive", output)?;
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .fs_context("writing archive", output)?;
    file.sync_all().fs_context("syncing archive", output)?;

    Ok(())
}
