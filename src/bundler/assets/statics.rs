//! Static web assets for dashboard applications.
//!
//! A dashboard app needs two sets of files under `static/`:
//! the bundler's own frontend entry points, embedded in the binary, and a
//! small allow-list of files from the installed dashboards extension.

use super::ExtensionLocator;
use crate::bundler::{
    error::{Error, Result},
    utils::fs,
};
use std::path::Path;

/// Location of the dashboards extension's frontend tree below `nbextensions`.
pub const DASHBOARDS_EXTENSION: &str = "urth_dash_js/notebook";

/// Individual files copied from the dashboards extension.
pub const COMPONENT_FILES: &[&str] = &[
    "bower_components/gridstack/dist/gridstack.min.css",
    "bower_components/gridstack/dist/gridstack.min.js",
    "bower_components/gridstack/dist/gridstack.min.map",
    "bower_components/jquery/dist/jquery.min.js",
    "bower_components/jquery/dist/jquery.min.map",
    "bower_components/jquery-ui/themes/smoothness/jquery-ui.min.css",
    "bower_components/lodash/lodash.min.js",
    "bower_components/requirejs/require.js",
];

/// Whole directories copied from the dashboards extension.
pub const COMPONENT_DIRS: &[&str] = &[
    "dashboard-common",
    "bower_components/jquery-ui/themes/smoothness/images",
];

/// Frontend files shipped with the bundler, relative to `static/`.
const EMBEDDED_STATIC: &[(&str, &str)] = &[
    ("main.js", include_str!("../../../resources/static/main.js")),
    (
        "urth/dashboard.js",
        include_str!("../../../resources/static/urth/dashboard.js"),
    ),
];

/// Populates `output_dir/static` with everything a dashboard app loads.
///
/// Fails with [`Error::MissingExtension`] when the dashboards extension is
/// not installed.
pub async fn bundle_web_static(output_dir: &Path, locator: &ExtensionLocator) -> Result<()> {
    let static_dir = output_dir.join("static");

    for (name, contents) in EMBEDDED_STATIC {
        fs::write_file(&static_dir.join(name), contents).await?;
    }

    let components = locator
        .locate(DASHBOARDS_EXTENSION)
        .ok_or(Error::MissingExtension {
            name: "jupyter_dashboards",
        })?;
    log::debug!("Copying dashboard components from {}", components.display());

    for file in COMPONENT_FILES {
        fs::copy_file(&components.join(file), &static_dir.join(file)).await?;
    }

    for dir in COMPONENT_DIRS {
        fs::copy_dir(&components.join(dir), &static_dir.join(dir)).await?;
    }

    Ok(())
}
