//! Error taxonomy for the packaging pipeline.
//!
//! Each pipeline stage owns an error type. [`Error`] unifies them so the
//! orchestrator can surface the first failure unchanged, tagged with the
//! stage that produced it.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    process::ExitStatus,
};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage that can fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Version lookup through `cargo metadata`
    ResolveVersion,
    /// Release build of the product binary
    Build,
    /// Staging directory assembly
    Stage,
    /// Tarball creation (non-Windows targets)
    Archive,
    /// MSI generation (Windows targets)
    Installer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolveVersion => "version resolution",
            Stage::Build => "build",
            Stage::Stage => "staging",
            Stage::Archive => "archive",
            Stage::Installer => "installer",
        };
        f.write_str(name)
    }
}

/// Filesystem failure with the operation and path that caused it.
#[derive(Debug, Error)]
#[error("{action} {}: {source}", path.display())]
pub struct FsError {
    /// What was being attempted, e.g. "creating staging directory"
    pub action: &'static str,
    /// Path the operation targeted
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: io::Error,
}

/// Attach filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the error with the attempted action and the path involved.
    fn fs_context(self, action: &'static str, path: impl AsRef<Path>)
    -> std::result::Result<T, FsError>;
}

impl<T> ErrorExt<T> for io::Result<T> {
    fn fs_context(
        self,
        action: &'static str,
        path: impl AsRef<Path>,
    ) -> std::result::Result<T, FsError> {
        self.map_err(|source| FsError {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Version lookup failures.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata query could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Spawn error
        #[source]
        source: io::Error,
    },

    /// The metadata query exited unsuccessfully
    #[error("`{command}` exited with {status}\n{diagnostics}")]
    QueryFailed {
        /// Command line that failed
        command: String,
        /// Exit status of the query
        status: ExitStatus,
        /// Captured stderr
        diagnostics: String,
    },

    /// The query succeeded but its output was not valid metadata
    #[error("malformed cargo metadata output: {0}")]
    Parse(#[from] serde_json::Error),

    /// No workspace member carries the product name
    #[error("package `{name}` not found in workspace metadata")]
    PackageNotFound {
        /// Requested package name
        name: String,
    },

    /// More than one workspace member carries the product name
    #[error("package name `{name}` matches {count} packages in workspace metadata")]
    AmbiguousPackage {
        /// Requested package name
        name: String,
        /// Number of matching packages
        count: usize,
    },

    /// The package version is empty or not a semantic version
    #[error("package `{name}` has invalid version `{version}`: {reason}")]
    InvalidVersion {
        /// Package name
        name: String,
        /// Version string as reported
        version: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Release build failures.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The compiler toolchain is not installed or not executable
    #[error("toolchain `{program}` not found on PATH")]
    ToolchainUnavailable {
        /// Program that was looked up
        program: String,
    },

    /// The build command could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Spawn error
        #[source]
        source: io::Error,
    },

    /// Compilation failed (includes a missing target toolchain)
    #[error("`{command}` exited with {status}\n{diagnostics}")]
    Failed {
        /// Command line that failed
        command: String,
        /// Exit status of the build
        status: ExitStatus,
        /// Tail of the captured stderr
        diagnostics: String,
    },
}

/// Staging directory assembly failures.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The build reported success but left no binary at the expected path
    #[error("compiled binary not found at {}", path.display())]
    MissingBinary {
        /// Path where the binary was expected
        path: PathBuf,
    },

    /// Filesystem operation failed
    #[error(transparent)]
    Io(#[from] FsError),
}

/// Tarball creation failures.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Filesystem or compression failure
    #[error(transparent)]
    Io(#[from] FsError),

    /// Staging directory traversal failed
    #[error("walking staging directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The blocking archive task did not complete
    #[error("archive task did not complete: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// MSI generation failures.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// `cargo-wix` is not installed or not runnable
    #[error("installer toolchain unavailable: {reason}")]
    ToolchainUnavailable {
        /// Why the toolchain was rejected
        reason: String,
    },

    /// The WiX source template could not be rendered
    #[error("rendering WiX source: {0}")]
    Template(String),

    /// Filesystem operation failed
    #[error(transparent)]
    Io(#[from] FsError),

    /// The installer command could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Spawn error
        #[source]
        source: io::Error,
    },

    /// The installer toolchain reported failure
    #[error("`{command}` exited with {status}\n{diagnostics}")]
    Failed {
        /// Command line that failed
        command: String,
        /// Exit status
        status: ExitStatus,
        /// Tail of the captured stderr
        diagnostics: String,
    },

    /// The toolchain exited successfully without writing the installer
    #[error("installer toolchain reported success but {} was not created", path.display())]
    MissingOutput {
        /// Expected installer path
        path: PathBuf,
    },
}

/// Pipeline error: the first stage failure, reported verbatim.
#[derive(Debug, Error)]
pub enum Error {
    /// Version resolution failed
    #[error("version resolution failed: {0}")]
    Metadata(#[from] MetadataError),

    /// Release build failed
    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    /// Staging failed
    #[error("staging failed: {0}")]
    Staging(#[from] StagingError),

    /// Archiving failed
    #[error("archive failed: {0}")]
    Archive(#[from] ArchiveError),

    /// Installer generation failed
    #[error("installer failed: {0}")]
    Installer(#[from] InstallerError),
}

impl Error {
    /// Stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            Error::Metadata(_) => Stage::ResolveVersion,
            Error::Build(_) => Stage::Build,
            Error::Staging(_) => Stage::Stage,
            Error::Archive(_) => Stage::Archive,
            Error::Installer(_) => Stage::Installer,
        }
    }
}
