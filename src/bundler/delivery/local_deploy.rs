//! Static dashboard app served by the notebook server itself.

use crate::bundler::{
    assets::{bundle_declarative_widgets, bundle_file_references, bundle_web_static},
    error::Result,
    handler::RequestHandler,
    notebook::notebook_name,
    utils::{fs, url},
};
use std::{collections::BTreeMap, path::Path};

/// Directory below the content root holding locally deployed dashboards.
pub const LOCAL_DASHBOARDS_DIR: &str = "local_dashboards";

/// Builds the app under `<root>/local_dashboards/<name>` and redirects to it.
pub async fn bundle(handler: &mut dyn RequestHandler, notebook_path: &Path) -> Result<()> {
    let name = notebook_name(notebook_path)?;
    let settings = handler.settings();
    let output_dir = settings.root_dir().join(LOCAL_DASHBOARDS_DIR).join(&name);
    fs::create_dir_all(&output_dir, true).await?;

    let index = settings
        .converter()
        .render(
            notebook_path,
            &BTreeMap::new(),
            "html",
            &std::env::current_dir()?,
            None,
        )
        .await?;
    fs::write_file(&output_dir.join("index.html"), index).await?;

    bundle_file_references(&output_dir, notebook_path, handler.tools()).await?;
    bundle_web_static(&output_dir, settings.locator()).await?;
    bundle_declarative_widgets(&output_dir, notebook_path, Some("static"), settings.locator())
        .await?;

    let location = url::join_path(
        settings.base_url(),
        &["files", LOCAL_DASHBOARDS_DIR, &name, "index.html"],
    )?;
    log::info!("Deployed {name} to {}", output_dir.display());
    handler.redirect(&location);
    Ok(())
}
