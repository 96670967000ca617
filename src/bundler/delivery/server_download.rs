//! Download of the bundle a dashboard server upload would send.

use crate::bundler::{
    builder::make_upload_bundle,
    error::{ErrorExt, Result},
    handler::RequestHandler,
    notebook::{notebook_basename, notebook_name},
};
use std::path::Path;

/// Sends the notebook alone, or zipped with its resources, as an attachment.
pub async fn bundle(handler: &mut dyn RequestHandler, notebook_path: &Path) -> Result<()> {
    let name = notebook_name(notebook_path)?;
    let tmp_dir = tempfile::tempdir()?;
    let staging_dir = tmp_dir.path().join(&name);

    let bundle_path = make_upload_bundle(
        notebook_path,
        &staging_dir,
        handler.tools(),
        handler.settings().locator(),
    )
    .await?;

    let (file_name, content_type) = if bundle_path == notebook_path {
        (notebook_basename(notebook_path)?, "application/json")
    } else {
        (format!("{name}.zip"), "application/zip")
    };

    let contents = tokio::fs::read(&bundle_path)
        .await
        .fs_context("reading bundle", &bundle_path)?;
    handler.set_header(
        "Content-Disposition",
        &format!("attachment; filename=\"{file_name}\""),
    );
    handler.set_header("Content-Type", content_type);
    handler.write(&contents);
    handler.finish();
    Ok(())
}
