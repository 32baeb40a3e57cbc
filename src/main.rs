//! Release Packager - release builds and distributable artifacts for Rust binaries.
//!
//! This binary builds a product for a target triple and packages it as a
//! tarball (.tar.gz) or a Windows installer (.msi), reporting the artifact
//! path only once it is guaranteed to exist.

use release_packager::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
