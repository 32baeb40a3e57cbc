//! Command line interface for the release packager.
//!
//! Reads naming defaults from the manifest, freezes them into [`Settings`]
//! together with the command line, and runs the [`Packager`].

mod args;

pub use args::Args;

use crate::{
    bundler::{PackagedArtifact, Packager, Settings, SettingsBuilder},
    error::{CliError, Result},
    metadata,
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Runs the pipeline for already-parsed arguments.
///
/// Returns the process exit code on success.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let settings = settings_from_args(args)?;
    let mut packager = Packager::new(settings);
    let artifact = packager.package().await?;

    print_artifact(&artifact);

    Ok(0)
}

/// Merges command line overrides over the manifest's defaults.
pub fn settings_from_args(args: Args) -> Result<Settings> {
    let manifest = metadata::load_manifest(&args.manifest_path)?;
    let mut package = manifest.into_package_settings();

    if let Some(product) = args.product {
        package.product_name = product;
    }
    if let Some(binary) = args.binary {
        package.binary_name = binary;
    }

    let mut builder = SettingsBuilder::new()
        .manifest_path(&args.manifest_path)
        .package_settings(package)
        .cargo(&args.cargo);
    if let Some(target) = args.target {
        builder = builder.target(target);
    }

    builder.build()
}

fn print_artifact(artifact: &PackagedArtifact) {
    println!("{}", artifact.path.display());
    println!("  {} {}", artifact.packaging, artifact.version);
    println!("  size:   {} bytes", artifact.size);
    println!("  sha256: {}", artifact.checksum);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn overrides_win_over_manifest_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("Cargo.toml");
        std::fs::write(
            &manifest,
            "[package]\nname = \"report-builder\"\nversion = \"1.2.0\"\n",
        )
        .unwrap();

        let args = Args::try_parse_from([
            "release-packager",
            "x86_64-pc-windows-msvc",
            "--manifest-path",
            manifest.to_str().unwrap(),
            "--bin",
            "rb",
        ])
        .unwrap();
        let settings = settings_from_args(args).unwrap();

        assert_eq!(settings.product_name(), "report-builder");
        assert_eq!(settings.binary_name(), "rb");
        assert_eq!(settings.target().as_str(), "x86_64-pc-windows-msvc");
    }

    #[test]
    fn missing_manifest_is_a_cli_error() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("Cargo.toml");
        let args = Args::try_parse_from([
            "release-packager",
            "--manifest-path",
            manifest.to_str().unwrap(),
        ])
        .unwrap();

        let err = settings_from_args(args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
