//! Release packaging for Rust binaries
//!
//! This library builds a product binary in release mode for one target
//! triple and packages it:
//! - Linux and macOS targets: `.tar.gz` of a versioned staging directory
//! - Windows targets: `.msi` installer through cargo-wix
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
