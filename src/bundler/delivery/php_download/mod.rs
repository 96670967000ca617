//! Downloadable PHP dashboard application.
//!
//! The archive contains `index.php`, the static assets, any referenced files
//! and widgets, plus `Dockerfile`, `manifest.yml` and `README.md` for
//! deployment.

mod meta;
mod template;

pub use meta::{KernelDefaults, bundle_meta};

use crate::bundler::{
    assets::{bundle_declarative_widgets, bundle_file_references, bundle_web_static},
    builder::zip_dir,
    convert::PHP_TEMPLATE,
    error::{ErrorExt, Result},
    handler::RequestHandler,
    notebook::notebook_name,
    settings::KernelServiceConfig,
    utils::fs,
};
use std::{collections::BTreeMap, path::Path};

/// Bundles the notebook as a PHP app and sends it as a zip download.
pub async fn bundle(
    handler: &mut dyn RequestHandler,
    notebook_path: &Path,
    kernel: &KernelServiceConfig,
) -> Result<()> {
    let name = notebook_name(notebook_path)?;
    let tmp_dir = tempfile::tempdir()?;
    let output_dir = tmp_dir.path().join(&name);
    fs::create_dir_all(&output_dir, false).await?;

    let settings = handler.settings();
    let converter = settings.converter();
    let template = converter.template_dir().join(PHP_TEMPLATE);
    let index = converter
        .render(
            notebook_path,
            &BTreeMap::new(),
            "html",
            &std::env::current_dir()?,
            Some(&template),
        )
        .await?;
    fs::write_file(&output_dir.join("index.php"), index).await?;

    bundle_file_references(&output_dir, notebook_path, handler.tools()).await?;
    bundle_web_static(&output_dir, settings.locator()).await?;
    bundle_declarative_widgets(&output_dir, notebook_path, Some("static"), settings.locator())
        .await?;
    bundle_meta(&output_dir, &name, &*handler, kernel).await?;

    let archive = tmp_dir.path().join(format!("{name}.zip"));
    zip_dir(&output_dir, &archive).await?;
    let contents = tokio::fs::read(&archive)
        .await
        .fs_context("reading archive", &archive)?;

    handler.set_header(
        "Content-Disposition",
        &format!("attachment; filename=\"{name}.zip\""),
    );
    handler.set_header("Content-Type", "application/zip");
    handler.write(&contents);
    handler.finish();
    log::info!("Sent PHP bundle for {name} ({} bytes)", contents.len());
    Ok(())
}
