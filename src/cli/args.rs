//! Command line argument parsing and validation.

use crate::bundler::TargetTriple;
use clap::Parser;
use std::path::PathBuf;

/// Release packager for Rust binaries
#[derive(Parser, Debug)]
#[command(
    name = "release-packager",
    version,
    about = "Builds a Rust binary in release mode and packages it for distribution",
    long_about = "Builds a Rust binary in release mode for a target triple and packages it.

Windows targets produce an MSI installer at target/wix/<product>-<target>.msi
through cargo-wix. Every other target produces a tarball at
target/dist/<product>-<version>-<target>.tar.gz.

Usage:
  release-packager
  release-packager aarch64-apple-darwin
  release-packager x86_64-pc-windows-msvc --manifest-path tools/report-builder/Cargo.toml

Exit code 0 = artifact guaranteed to exist at the printed path."
)]
pub struct Args {
    /// Target triple to build and package (defaults to the host family's target)
    #[arg(value_name = "TARGET")]
    pub target: Option<TargetTriple>,

    /// Path to the product's Cargo.toml
    #[arg(
        long,
        value_name = "PATH",
        env = "RELEASE_PACKAGER_MANIFEST",
        default_value = "Cargo.toml"
    )]
    pub manifest_path: PathBuf,

    /// Package to release (defaults to [package].name of the manifest)
    #[arg(long, value_name = "NAME")]
    pub product: Option<String>,

    /// Binary target to ship (defaults to the first [[bin]] or the package name)
    #[arg(long = "bin", value_name = "NAME")]
    pub binary: Option<String>,

    /// Cargo executable used for metadata, builds and cargo wix
    #[arg(long, value_name = "PATH", env = "CARGO", default_value = "cargo")]
    pub cargo: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.product.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("--product cannot be empty".to_string());
        }
        if self.binary.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err("--bin cannot be empty".to_string());
        }
        if self.cargo.as_os_str().is_empty() {
            return Err("--cargo cannot be empty".to_string());
        }
        Ok(())
    }
}
