//! Product metadata.

/// Product metadata used for naming and installer branding.
///
/// This typically maps from the product's `Cargo.toml` `[package]` section.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::PackageSettings;
///
/// let package = PackageSettings {
///     product_name: "report-builder".into(),
///     binary_name: "report-builder".into(),
///     description: "CLI utility for configuring report paths.".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Package name; must match a package in `cargo metadata`.
    ///
    /// Also the leading component of staging and artifact names.
    pub product_name: String,

    /// Name of the binary target to build and ship.
    pub binary_name: String,

    /// Brief description of the product.
    ///
    /// Shown in the installer's summary information.
    pub description: String,

    /// Package authors, `Name <email>` format.
    pub authors: Vec<String>,

    /// Publisher shown by the Windows installer.
    ///
    /// From `[package.metadata.bundle] publisher`.
    ///
    /// Default: None (first author, then product name)
    pub publisher: Option<String>,
}

impl PackageSettings {
    /// Publisher name for installer metadata.
    pub fn manufacturer(&self) -> String {
        if let Some(publisher) = &self.publisher {
            return publisher.clone();
        }

        self.authors
            .first()
            .map(|author| match author.find('<') {
                Some(idx) => author[..idx].trim().to_string(),
                None => author.trim().to_string(),
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.product_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manufacturer_prefers_publisher_then_author() {
        let mut package = PackageSettings {
            product_name: "report-builder".into(),
            authors: vec!["Voss Lab <lab@example.edu>".into()],
            ..Default::default()
        };
        assert_eq!(package.manufacturer(), "Voss Lab");

        package.publisher = Some("Example Inc.".into());
        assert_eq!(package.manufacturer(), "Example Inc.");

        package.publisher = None;
        package.authors = vec!["<anon@example.edu>".into()];
        assert_eq!(package.manufacturer(), "report-builder");
    }
}
