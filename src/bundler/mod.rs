//! Release packaging pipeline.
//!
//! Turns a Cargo package into a distributable artifact for one target triple:
//!
//! - [`settings`] - frozen run configuration
//! - [`build`] - release build through cargo
//! - [`staging`] - staging directory assembly
//! - [`platform`] - tarball and MSI creation
//! - [`builder`] - the [`Packager`] state machine tying the stages together
//!
//! Version resolution lives in [`crate::metadata`].

pub mod build;
pub mod builder;
pub mod error;
pub mod layout;
pub mod platform;
pub mod process;
pub mod settings;
pub mod staging;
pub mod utils;

pub use builder::{PackagedArtifact, Packager, PipelineState};
pub use error::{
    ArchiveError, BuildError, Error, FsError, InstallerError, MetadataError, Result, Stage,
    StagingError,
};
pub use layout::ReleaseLayout;
pub use settings::{PackageSettings, Packaging, Settings, SettingsBuilder, TargetTriple};
