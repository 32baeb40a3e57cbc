//! Configuration structures for a packaging run.
//!
//! [`Settings`] is built once from the command line and the product manifest
//! and is read-only for the rest of the run.

mod builder;
mod core;
mod package;
mod target;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use package::PackageSettings;
pub use target::{DEFAULT_TARGET, Packaging, TargetTriple};
