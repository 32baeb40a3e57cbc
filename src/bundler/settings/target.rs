//! Target triples and the packaging family they select.

use crate::error::CliError;
use std::{fmt, str::FromStr};

/// Default target when none is given on the command line.
#[cfg(target_os = "macos")]
pub const DEFAULT_TARGET: &str = "aarch64-apple-darwin";
/// Default target when none is given on the command line.
#[cfg(target_os = "windows")]
pub const DEFAULT_TARGET: &str = "x86_64-pc-windows-msvc";
/// Default target when none is given on the command line.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const DEFAULT_TARGET: &str = "x86_64-unknown-linux-gnu";

/// How a release is shipped for a platform family.
///
/// Chosen once from the target triple; the orchestrator dispatches on it
/// and nothing downstream re-checks the platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Packaging {
    /// `.tar.gz` archive of the staging directory (Linux, macOS, BSDs)
    Archive,
    /// `.msi` installer produced by cargo-wix (Windows)
    Installer,
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Packaging::Archive => f.write_str("archive"),
            Packaging::Installer => f.write_str("installer"),
        }
    }
}

/// Rust target triple, e.g. `aarch64-apple-darwin`.
///
/// Validated on construction and immutable afterwards. The triple ends up in
/// directory and file names, so whitespace and path separators are rejected.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TargetTriple(String);

impl TargetTriple {
    /// Parses and validates a triple.
    pub fn parse(triple: &str) -> Result<Self, CliError> {
        let triple = triple.trim();

        if triple.is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "target triple cannot be empty".to_string(),
            });
        }

        if triple
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\')
        {
            return Err(CliError::InvalidArguments {
                reason: format!("invalid target triple `{triple}`"),
            });
        }

        if triple.split('-').count() < 2 || triple.split('-').any(str::is_empty) {
            return Err(CliError::InvalidArguments {
                reason: format!("target triple `{triple}` must look like <arch>-<vendor>-<os>"),
            });
        }

        Ok(Self(triple.to_string()))
    }

    /// Host-family default triple.
    pub fn host_default() -> Self {
        Self(DEFAULT_TARGET.to_string())
    }

    /// Returns the triple as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the triple names a Windows target.
    pub fn is_windows(&self) -> bool {
        self.0.split('-').any(|part| part == "windows")
    }

    /// Packaging family for this target.
    pub fn packaging(&self) -> Packaging {
        if self.is_windows() {
            Packaging::Installer
        } else {
            Packaging::Archive
        }
    }

    /// File name of a compiled binary for this target (`.exe` on Windows).
    pub fn executable_name(&self, binary: &str) -> String {
        if self.is_windows() {
            format!("{binary}.exe")
        } else {
            binary.to_string()
        }
    }
}

impl FromStr for TargetTriple {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_targets_select_installer() {
        for triple in [
            "x86_64-pc-windows-msvc",
            "aarch64-pc-windows-msvc",
            "x86_64-pc-windows-gnu",
        ] {
            let target = TargetTriple::parse(triple).unwrap();
            assert_eq!(target.packaging(), Packaging::Installer, "{triple}");
            assert_eq!(target.executable_name("report-builder"), "report-builder.exe");
        }
    }

    #[test]
    fn unix_targets_select_archive() {
        for triple in [
            "aarch64-apple-darwin",
            "x86_64-apple-darwin",
            "x86_64-unknown-linux-gnu",
            "aarch64-unknown-linux-musl",
        ] {
            let target = TargetTriple::parse(triple).unwrap();
            assert_eq!(target.packaging(), Packaging::Archive, "{triple}");
            assert_eq!(target.executable_name("report-builder"), "report-builder");
        }
    }

    #[test]
    fn rejects_malformed_triples() {
        for triple in ["", "   ", "x86_64", "x86_64--linux", "../etc", "aarch64 apple darwin"] {
            assert!(TargetTriple::parse(triple).is_err(), "{triple:?} accepted");
        }
    }

    #[test]
    fn host_default_is_valid() {
        let target = TargetTriple::host_default();
        assert_eq!(TargetTriple::parse(target.as_str()).unwrap(), target);
    }
}
