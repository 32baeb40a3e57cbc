//! WiX source generation.
//!
//! cargo-wix compiles `<package>/wix/main.wxs`. Products that ship their own
//! source keep it; otherwise one is rendered from [`WXS_TEMPLATE`].

use super::template::WXS_TEMPLATE;
use crate::bundler::{InstallerError, Settings, error::ErrorExt};
use handlebars::Handlebars;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use uuid::Uuid;

/// Location of the WiX source cargo-wix reads for a package.
pub fn wxs_path(manifest_dir: &Path) -> PathBuf {
    manifest_dir.join("wix").join("main.wxs")
}

/// Ensures `wix/main.wxs` exists, rendering the built-in template if needed.
///
/// Returns the source path.
pub async fn ensure_wxs(settings: &Settings) -> Result<PathBuf, InstallerError> {
    let path = wxs_path(settings.manifest_dir());

    let exists = tokio::fs::try_exists(&path)
        .await
        .fs_context("checking for WiX source", &path)?;
    if exists {
        log::debug!("Using existing WiX source: {}", path.display());
        return Ok(path);
    }

    let contents = render_wxs(settings)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating WiX source directory", parent)?;
    }
    tokio::fs::write(&path, contents)
        .await
        .fs_context("writing WiX source", &path)?;

    log::info!("Generated WiX source: {}", path.display());

    Ok(path)
}

/// Renders the WiX template for the product.
pub fn render_wxs(settings: &Settings) -> Result<String, InstallerError> {
    let package = settings.package();
    let binary_file = format!("{}.exe", settings.binary_name());

    let mut data = BTreeMap::new();
    data.insert("product_name", settings.product_name().to_string());
    data.insert("manufacturer", package.manufacturer());
    data.insert("description", package.description.clone());
    data.insert(
        "upgrade_code",
        stable_guid(settings.product_name(), "upgrade-code"),
    );
    data.insert(
        "path_component_guid",
        stable_guid(settings.product_name(), "path-component"),
    );
    data.insert(
        "binary_component_guid",
        stable_guid(settings.product_name(), "binary-component"),
    );
    data.insert(
        "binary_source",
        format!("$(var.CargoTargetBinDir)\\{binary_file}"),
    );
    data.insert("binary_file", binary_file);

    // Default escaping is HTML escaping, which is also valid inside XML attributes
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars
        .register_template_string("main.wxs", WXS_TEMPLATE)
        .map_err(|e| InstallerError::Template(format!("failed to register template: {e}")))?;

    handlebars
        .render("main.wxs", &data)
        .map_err(|e| InstallerError::Template(format!("failed to render template: {e}")))
}

/// GUID that is stable for a product across releases.
///
/// The upgrade code in particular must never change, or new installers will
/// install side by side with old ones instead of replacing them.
fn stable_guid(product_name: &str, purpose: &str) -> String {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("release-packager.{product_name}.{purpose}").as_bytes(),
    )
    .hyphenated()
    .to_string()
    .to_uppercase()
}
