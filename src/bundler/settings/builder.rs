//! Builder for constructing Settings.

use super::Settings;
use crate::bundler::{assets::ExtensionLocator, convert::Converter};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Only the content root is required; the locator and converter default to
/// their environment-derived configuration.
#[derive(Default)]
pub struct SettingsBuilder {
    base_url: Option<String>,
    root_dir: Option<PathBuf>,
    locator: Option<ExtensionLocator>,
    converter: Option<Converter>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the server base URL.
    ///
    /// Default: `/`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the content root directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn root_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the extension search roots.
    ///
    /// Default: the Jupyter data path from the environment
    pub fn extension_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.locator = Some(ExtensionLocator::new(roots));
        self
    }

    /// Sets the notebook converter.
    ///
    /// Default: [`Converter::from_env`]
    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `root_dir` is missing.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        Ok(Settings::new(
            self.base_url.unwrap_or_else(|| "/".to_string()),
            self.root_dir.context("root_dir is required")?,
            self.locator.unwrap_or_else(ExtensionLocator::from_env),
            self.converter.unwrap_or_else(Converter::from_env),
        ))
    }
}
