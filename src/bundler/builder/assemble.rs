//! Upload bundle assembly shared by the server upload and download bundlers.

use super::archive::zip_dir;
use crate::bundler::{
    assets::{BundlerTools, ExtensionLocator, bundle_declarative_widgets, bundle_file_references},
    error::Result,
    utils::fs,
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Name of the notebook inside a bundle.
pub const INDEX_NOTEBOOK: &str = "index.ipynb";

/// Stages a notebook with its references and widgets.
///
/// `staging_dir` is erased and recreated. When nothing besides the notebook
/// ends up staged, the original `notebook_path` is returned unchanged.
/// Otherwise the staging contents are zipped to `<staging_dir>.zip` and that
/// path is returned.
pub async fn make_upload_bundle(
    notebook_path: &Path,
    staging_dir: &Path,
    tools: Option<Arc<dyn BundlerTools>>,
    locator: &ExtensionLocator,
) -> Result<PathBuf> {
    fs::create_dir_all(staging_dir, true).await?;
    fs::copy_file(notebook_path, &staging_dir.join(INDEX_NOTEBOOK)).await?;

    bundle_file_references(staging_dir, notebook_path, tools).await?;
    bundle_declarative_widgets(staging_dir, notebook_path, None, locator).await?;

    if fs::entry_count(staging_dir).await? == 1 {
        log::debug!("{} has no resources, sending it alone", notebook_path.display());
        return Ok(notebook_path.to_path_buf());
    }

    let mut archive: OsString = staging_dir.as_os_str().to_owned();
    archive.push(".zip");
    let archive = zip_dir(staging_dir, Path::new(&archive)).await?;
    log::info!("Bundled {} into {}", notebook_path.display(), archive.display());
    Ok(archive)
}
