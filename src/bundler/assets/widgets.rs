//! Declarative widgets support.
//!
//! Most notebooks don't use declarative widgets, so their frontend code is
//! only bundled when a cell mentions one of the widget elements.

use super::ExtensionLocator;
use crate::bundler::{
    error::{Error, Result},
    notebook::Notebook,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Marker found in any cell that uses declarative widgets.
pub const WIDGET_TRIGGER: &str = "urth-core-";

/// Extension names, newest first.
pub const WIDGET_EXTENSIONS: &[&str] = &["declarativewidgets", "urth_widgets"];

/// Component directory names inside the widget extension, newest first.
pub const COMPONENT_DIRS: &[&str] = &["urth_components", "bower_components"];

/// Copies the widget JS and components into the bundle if the notebook uses widgets.
///
/// Output lands in `output_dir/<widget_folder>/urth_widgets/js` and
/// `output_dir/<widget_folder>/urth_components`, or directly below
/// `output_dir` when `widget_folder` is `None`.
///
/// Returns whether anything was copied.
pub async fn bundle_declarative_widgets(
    output_dir: &Path,
    notebook_path: &Path,
    widget_folder: Option<&str>,
    locator: &ExtensionLocator,
) -> Result<bool> {
    let notebook = Notebook::read(notebook_path).await?;
    if !notebook.any_cell_contains(WIDGET_TRIGGER) {
        return Ok(false);
    }

    let widgets_dir = locator
        .locate_any(WIDGET_EXTENSIONS)
        .ok_or(Error::MissingExtension {
            name: "jupyter_declarativewidgets",
        })?;
    log::info!("Bundling declarative widgets from {}", widgets_dir.display());

    let base: PathBuf = match widget_folder {
        Some(folder) => output_dir.join(folder),
        None => output_dir.to_path_buf(),
    };

    fs::copy_dir(&widgets_dir.join("js"), &base.join("urth_widgets").join("js")).await?;

    let components = COMPONENT_DIRS
        .iter()
        .map(|name| widgets_dir.join(name))
        .find(|dir| dir.is_dir())
        .ok_or_else(|| {
            Error::GenericError(format!(
                "no widget components found in {}",
                widgets_dir.display()
            ))
        })?;
    fs::copy_dir(&components, &base.join("urth_components")).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_WIDGETS: &str = r#"{"cells":[{"cell_type":"code","source":"%%html\n<link rel='import' href='urth_components/urth-core-import/urth-core-import.html'>"}]}"#;
    const WITHOUT_WIDGETS: &str = r#"{"cells":[{"cell_type":"code","source":"print('hi')"}]}"#;

    fn install_widgets(root: &Path, name: &str, components: &str) {
        let ext = root.join("nbextensions").join(name);
        std::fs::create_dir_all(ext.join("js/init")).unwrap();
        std::fs::write(ext.join("js/init/init.js"), "x").unwrap();
        std::fs::create_dir_all(ext.join(components).join("component-a")).unwrap();
    }

    fn notebook(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("nb.ipynb");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn copies_widgets_when_triggered() {
        let data = tempfile::tempdir().unwrap();
        install_widgets(data.path(), "urth_widgets", "bower_components");
        let out = tempfile::tempdir().unwrap();
        let nb = notebook(out.path(), WITH_WIDGETS);
        let locator = ExtensionLocator::new(vec![data.path().into()]);

        let copied = bundle_declarative_widgets(out.path(), &nb, Some("static"), &locator)
            .await
            .unwrap();

        assert!(copied);
        assert!(out.path().join("static/urth_widgets/js/init/init.js").is_file());
        assert!(out.path().join("static/urth_components/component-a").is_dir());
    }

    #[tokio::test]
    async fn skips_notebooks_without_widgets() {
        let data = tempfile::tempdir().unwrap();
        install_widgets(data.path(), "declarativewidgets", "urth_components");
        let out = tempfile::tempdir().unwrap();
        let nb = notebook(out.path(), WITHOUT_WIDGETS);
        let locator = ExtensionLocator::new(vec![data.path().into()]);

        let copied = bundle_declarative_widgets(out.path(), &nb, Some("static"), &locator)
            .await
            .unwrap();

        assert!(!copied);
        assert!(!out.path().join("static/urth_widgets").exists());
        assert!(!out.path().join("static/urth_components").exists());
    }

    #[tokio::test]
    async fn prefers_new_names_and_root_folder() {
        let data = tempfile::tempdir().unwrap();
        install_widgets(data.path(), "declarativewidgets", "urth_components");
        let out = tempfile::tempdir().unwrap();
        let nb = notebook(out.path(), WITH_WIDGETS);
        let locator = ExtensionLocator::new(vec![data.path().into()]);

        bundle_declarative_widgets(out.path(), &nb, None, &locator)
            .await
            .unwrap();

        assert!(out.path().join("urth_widgets/js").is_dir());
        assert!(out.path().join("urth_components/component-a").is_dir());
    }

    #[tokio::test]
    async fn missing_extension_is_an_error_when_needed() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let nb = notebook(out.path(), WITH_WIDGETS);
        let locator = ExtensionLocator::new(vec![data.path().into()]);

        let err = bundle_declarative_widgets(out.path(), &nb, None, &locator)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingExtension { .. }));
    }
}
