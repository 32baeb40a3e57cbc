//! Top-level error types.
//!
//! Pipeline stage failures live in [`crate::bundler::error`]; this module adds
//! the configuration errors raised before the pipeline starts.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for the packager
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument or manifest errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// A pipeline stage failed
    #[error(transparent)]
    Pipeline(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// The product manifest could not be read or understood
    #[error("Manifest {}: {reason}", path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// Process exit code for this error.
    ///
    /// Every failure exits non-zero; configuration errors use clap's usage
    /// code so scripts can tell them apart from stage failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackagerError::Cli(_) => 2,
            PackagerError::Pipeline(_) => 1,
        }
    }
}
