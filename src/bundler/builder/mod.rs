//! Pipeline orchestration and coordination.
//!
//! This module provides the [`Packager`] orchestrator that drives a release
//! from version resolution to a finished artifact.
//!
//! # Overview
//!
//! The packager:
//! 1. Resolves the version and target directory with `cargo metadata`
//! 2. Builds the release binary for the target triple
//! 3. Stages the binary under `target/dist`
//! 4. Archives the staging directory, or builds an MSI for Windows targets
//! 5. Returns a [`PackagedArtifact`] with size and checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - [`Packager`] state machine
//! - `tool_detection` - External tool availability checking

pub mod checksum;
mod orchestrator;
pub(crate) mod tool_detection;

pub use orchestrator::{PackagedArtifact, Packager, PipelineState};
