//! Artifact formats.
//!
//! - `archive` - `.tar.gz` of the staging directory (Linux, macOS)
//! - `windows` - MSI installer (Windows)

pub mod archive;
pub mod windows;
