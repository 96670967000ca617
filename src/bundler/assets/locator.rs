//! Installed notebook extension lookup.

use std::path::{Path, PathBuf};

/// Subdirectory of every data root that holds notebook extensions.
pub const EXTENSIONS_DIR: &str = "nbextensions";

/// Finds notebook extensions across an ordered list of data roots.
///
/// Order is significant: the first root holding the requested path wins and
/// results are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionLocator {
    roots: Vec<PathBuf>,
}

impl ExtensionLocator {
    /// Creates a locator over explicit roots.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Creates a locator over the standard Jupyter data path.
    ///
    /// Order: `JUPYTER_PATH` entries, the user data dir (`JUPYTER_DATA_DIR`
    /// or the platform data dir), then the system-wide share directories.
    pub fn from_env() -> Self {
        let mut roots = Vec::new();

        if let Some(paths) = std::env::var_os("JUPYTER_PATH") {
            roots.extend(std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
        }

        match std::env::var_os("JUPYTER_DATA_DIR") {
            Some(dir) if !dir.is_empty() => roots.push(PathBuf::from(dir)),
            _ => {
                if let Some(data) = dirs::data_dir() {
                    roots.push(data.join("jupyter"));
                }
            }
        }

        if cfg!(unix) {
            roots.push(PathBuf::from("/usr/local/share/jupyter"));
            roots.push(PathBuf::from("/usr/share/jupyter"));
        }

        log::debug!("Extension search path: {:?}", roots);
        Self { roots }
    }

    /// The data roots in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Returns `root/nbextensions/<relative>` for the first root where it exists.
    pub fn locate(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let relative = relative.as_ref();
        self.roots
            .iter()
            .map(|root| root.join(EXTENSIONS_DIR).join(relative))
            .find(|candidate| candidate.exists())
    }

    /// Tries each candidate name in order and returns the first that resolves.
    pub fn locate_any(&self, candidates: &[&str]) -> Option<PathBuf> {
        candidates.iter().find_map(|name| self.locate(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_root_wins() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(a.path().join("nbextensions/ext")).unwrap();
        std::fs::create_dir_all(b.path().join("nbextensions/ext")).unwrap();

        let locator = ExtensionLocator::new(vec![b.path().into(), a.path().into()]);
        assert_eq!(
            locator.locate("ext").unwrap(),
            b.path().join("nbextensions/ext")
        );
    }

    #[test]
    fn missing_extension_is_none() {
        let a = tempfile::tempdir().unwrap();
        let locator = ExtensionLocator::new(vec![a.path().into()]);
        assert!(locator.locate("urth_dash_js/notebook").is_none());
        assert!(ExtensionLocator::default().locate("anything").is_none());
    }

    #[test]
    fn candidates_tried_in_order() {
        let a = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(a.path().join("nbextensions/urth_widgets")).unwrap();
        let locator = ExtensionLocator::new(vec![a.path().into()]);

        let found = locator
            .locate_any(&["declarativewidgets", "urth_widgets"])
            .unwrap();
        assert!(found.ends_with("urth_widgets"));

        std::fs::create_dir_all(a.path().join("nbextensions/declarativewidgets")).unwrap();
        let found = locator
            .locate_any(&["declarativewidgets", "urth_widgets"])
            .unwrap();
        assert!(found.ends_with("declarativewidgets"));
    }
}
