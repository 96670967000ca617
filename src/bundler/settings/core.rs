//! Core Settings struct.

use crate::bundler::{assets::ExtensionLocator, convert::Converter};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Host settings shared by all bundlers.
///
/// # Examples
///
/// ```no_run
/// use dashboards_bundlers::bundler::SettingsBuilder;
///
/// # fn example() -> dashboards_bundlers::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root_dir("/home/me/notebooks")
///     .base_url("/user/me/")
///     .build()?;
/// assert_eq!(settings.base_url(), "/user/me/");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Base URL the notebook server is mounted at.
    base_url: String,

    /// Content root; notebook references are relative to it.
    root_dir: PathBuf,

    /// Where optional and mandatory extensions are looked up.
    locator: ExtensionLocator,

    /// External notebook converter.
    converter: Converter,
}

impl Settings {
    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the content root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Returns the extension locator.
    pub fn locator(&self) -> &ExtensionLocator {
        &self.locator
    }

    /// Returns the notebook converter.
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Resolves a notebook reference to an absolute path.
    ///
    /// Relative references are taken from the content root.
    pub fn resolve_notebook(&self, notebook: &Path) -> crate::bundler::Result<PathBuf> {
        let joined = self.root_dir.join(notebook);
        let absolute = joined
            .absolutize()
            .map_err(crate::bundler::Error::IoError)?;
        Ok(absolute.into_owned())
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        base_url: String,
        root_dir: PathBuf,
        locator: ExtensionLocator,
        converter: Converter,
    ) -> Self {
        Self {
            base_url,
            root_dir,
            locator,
            converter,
        }
    }
}
