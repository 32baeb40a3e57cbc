//! Packaging pipeline orchestration.
//!
//! This module provides the [`Packager`] orchestrator that drives one release
//! through version resolution, build, staging and the platform packaging step.

use super::checksum;
use crate::{
    bundler::{
        ArchiveError, Error, InstallerError, Packaging, ReleaseLayout, Result, Settings, Stage,
        StagingError, build,
        error::{ErrorExt, FsError},
        platform::{archive, windows::wix},
        staging,
    },
    metadata,
};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Where a packaging run currently stands.
///
/// ```text
/// Init -> VersionResolved -> Built -> Staged -> Archived -------> Done
///                                           \-> InstallerBuilt -/
/// ```
///
/// Any non-terminal state can move to [`PipelineState::Failed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has run yet
    Init,
    /// Version and target directory are known
    VersionResolved,
    /// The release binary was built
    Built,
    /// The staging directory holds the binary
    Staged,
    /// The tarball was written (non-Windows targets)
    Archived,
    /// The MSI was written (Windows targets)
    InstallerBuilt,
    /// The artifact exists at its deterministic path
    Done,
    /// A stage failed and the run stopped
    Failed {
        /// Stage that failed
        stage: Stage,
    },
}

impl PipelineState {
    /// True for `Done` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed { .. })
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Init => f.write_str("init"),
            PipelineState::VersionResolved => f.write_str("version resolved"),
            PipelineState::Built => f.write_str("built"),
            PipelineState::Staged => f.write_str("staged"),
            PipelineState::Archived => f.write_str("archived"),
            PipelineState::InstallerBuilt => f.write_str("installer built"),
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed { stage } => write!(f, "failed during {stage}"),
        }
    }
}

/// Artifact produced by a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackagedArtifact {
    /// Archive or installer
    pub packaging: Packaging,
    /// Deterministic artifact path
    pub path: PathBuf,
    /// Resolved product version
    pub version: String,
    /// Staging directory the artifact was made from
    pub staging_dir: PathBuf,
    /// SHA-256 over the staging tree (relative paths and contents)
    pub staging_checksum: String,
    /// Artifact size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the artifact
    pub checksum: String,
}

/// Main packaging orchestrator.
///
/// Runs the stages strictly in order. The first failure stops the run and is
/// returned unchanged; nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::{Packager, Settings};
///
/// # async fn example(settings: Settings) -> release_packager::bundler::Result<()> {
/// let mut packager = Packager::new(settings);
/// let artifact = packager.package().await?;
/// println!("{} ({} bytes, sha256 {})", artifact.path.display(), artifact.size, artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
    state: PipelineState,
}

impl Packager {
    /// Creates a packager in the `Init` state.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: PipelineState::Init,
        }
    }

    /// Returns the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs the whole pipeline.
    ///
    /// Every call is a fresh run starting from `Init`. On failure the state
    /// is left at `Failed` with the stage that produced the error.
    pub async fn package(&mut self) -> Result<PackagedArtifact> {
        self.state = PipelineState::Init;

        match self.run().await {
            Ok(artifact) => {
                self.advance(PipelineState::Done);
                Ok(artifact)
            }
            Err(e) => {
                self.advance(PipelineState::Failed { stage: e.stage() });
                Err(e)
            }
        }
    }

    async fn run(&mut self) -> Result<PackagedArtifact> {
        let packaging = self.settings.packaging();
        log::info!(
            "Packaging {} for {} ({})",
            self.settings.product_name(),
            self.settings.target(),
            packaging
        );

        let release = metadata::resolve_release(&self.settings).await?;
        let layout = ReleaseLayout::new(&self.settings, &release);
        self.advance(PipelineState::VersionResolved);

        staging::discard_stale_artifact(&layout.artifact_path(packaging)).await?;

        build::build_release(&self.settings).await?;
        self.advance(PipelineState::Built);

        let staging_dir = staging::assemble(&layout).await?;
        let staging_checksum = checksum::calculate_directory_sha256(&staging_dir)
            .await
            .map_err(StagingError::from)?;
        log::debug!("Staging tree sha256: {}", staging_checksum);
        self.advance(PipelineState::Staged);

        let path = match packaging {
            Packaging::Archive => {
                let path = archive::bundle_project(&layout).await?;
                self.advance(PipelineState::Archived);
                path
            }
            Packaging::Installer => {
                let path = wix::bundle_project(&self.settings, &layout).await?;
                self.advance(PipelineState::InstallerBuilt);
                path
            }
        };

        let (size, checksum) = describe_artifact(&path)
            .await
            .map_err(|e| match packaging {
                Packaging::Archive => Error::from(ArchiveError::from(e)),
                Packaging::Installer => Error::from(InstallerError::from(e)),
            })?;

        Ok(PackagedArtifact {
            packaging,
            path,
            version: release.version,
            staging_dir,
            staging_checksum,
            size,
            checksum,
        })
    }

    fn advance(&mut self, next: PipelineState) {
        match next {
            PipelineState::Failed { stage } => {
                log::error!("Pipeline {} -> failed during {}", self.state, stage)
            }
            _ => log::info!("Pipeline {} -> {}", self.state, next),
        }
        self.state = next;
    }
}

/// Size and SHA-256 of the finished artifact.
async fn describe_artifact(path: &Path) -> std::result::Result<(u64, String), FsError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;
    let checksum = checksum::calculate_file_sha256(path).await?;
    Ok((metadata.len(), checksum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PackageSettings, SettingsBuilder, TargetTriple};

    #[tokio::test]
    async fn unavailable_cargo_fails_at_version_resolution() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .manifest_path(tmp.path().join("Cargo.toml"))
            .package_settings(PackageSettings {
                product_name: "report-builder".into(),
                binary_name: "report-builder".into(),
                ..Default::default()
            })
            .target(TargetTriple::parse("aarch64-apple-darwin").unwrap())
            .cargo(tmp.path().join("no-such-cargo"))
            .build()
            .unwrap();
        let mut packager = Packager::new(settings);
        assert_eq!(packager.state(), PipelineState::Init);

        let err = packager.package().await.unwrap_err();

        assert_eq!(err.stage(), Stage::ResolveVersion);
        assert_eq!(
            packager.state(),
            PipelineState::Failed {
                stage: Stage::ResolveVersion
            }
        );
        assert!(packager.state().is_terminal());
        assert!(!tmp.path().join("target").exists());
    }

    #[test]
    fn states_render_for_logs() {
        assert_eq!(PipelineState::VersionResolved.to_string(), "version resolved");
        assert_eq!(
            PipelineState::Failed { stage: Stage::Build }.to_string(),
            "failed during build"
        );
        assert!(!PipelineState::Staged.is_terminal());
    }
}
