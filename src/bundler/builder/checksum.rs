//! Artifact checksum calculation.
//!
//! SHA-256 over a single artifact file, or over a whole directory tree for
//! comparing staging directories across runs.

use crate::bundler::error::{ErrorExt, FsError};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the hex-encoded SHA-256 of a file.
///
/// Reads the file in 8KB chunks.
pub async fn calculate_file_sha256(file_path: &Path) -> Result<String, FsError> {
    let mut hasher = Sha256::new();
    hash_file_into(&mut hasher, file_path).await?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Calculates the SHA-256 of a directory tree.
///
/// Files are visited in sorted order and each contributes its path relative
/// to `dir_path` followed by its content, so two trees hash equal exactly when
/// they hold the same files with the same bytes.
pub async fn calculate_directory_sha256(dir_path: &Path) -> Result<String, FsError> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir_path).to_path_buf();
            FsError {
                action: "walking directory for hashing",
                path,
                source: e.into(),
            }
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let mut hasher = Sha256::new();
    for file in files {
        if let Ok(rel_path) = file.strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }
        hash_file_into(&mut hasher, &file).await?;
    }

    Ok(format!("{:x}", hasher.finalize()))
}

async fn hash_file_into(hasher: &mut Sha256, path: &Path) -> Result<(), FsError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_hash_matches_known_digest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("abc");
        std::fs::write(&path, b"abc").unwrap();

        assert_eq!(
            calculate_file_sha256(&path).await.unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent");

        let err = calculate_file_sha256(&path).await.unwrap_err();
        assert_eq!(err.path, path);
    }

    #[tokio::test]
    async fn directory_hash_tracks_names_and_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        for dir in [&a, &b] {
            std::fs::create_dir_all(dir.join("bin")).unwrap();
            std::fs::write(dir.join("bin/tool"), b"binary").unwrap();
        }

        let hash_a = calculate_directory_sha256(&a).await.unwrap();
        assert_eq!(hash_a, calculate_directory_sha256(&b).await.unwrap());

        std::fs::rename(b.join("bin/tool"), b.join("bin/other")).unwrap();
        assert_ne!(hash_a, calculate_directory_sha256(&b).await.unwrap());

        std::fs::write(a.join("bin/tool"), b"changed").unwrap();
        assert_ne!(hash_a, calculate_directory_sha256(&a).await.unwrap());
    }
}
