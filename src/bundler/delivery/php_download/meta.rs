//! Deployment metadata for PHP dashboard bundles.

use super::template::{DOCKERFILE, MANIFEST, README};
use crate::bundler::{
    error::{Error, Result},
    handler::RequestHandler,
    settings::KernelServiceConfig,
    utils::fs,
};
use handlebars::Handlebars;
use std::{collections::BTreeMap, path::Path};

/// Kernel provider values written into the deployment files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelDefaults {
    /// Kernel service URL.
    pub kernel_service_url: String,
    /// tmpnb mode flag.
    pub tmpnb_mode: String,
}

impl KernelDefaults {
    /// Resolves kernel settings, falling back to the requesting server.
    ///
    /// Without `KERNEL_SERVICE_URL` the notebook server itself becomes the
    /// kernel provider and tmpnb mode is forced off.
    pub fn resolve(config: &KernelServiceConfig, handler: &dyn RequestHandler) -> Self {
        match &config.kernel_service_url {
            Some(url) => Self {
                kernel_service_url: url.clone(),
                tmpnb_mode: config.tmpnb_mode.clone().unwrap_or_else(|| "false".into()),
            },
            None => {
                let request = handler.request();
                Self {
                    kernel_service_url: format!(
                        "{}://{}{}",
                        request.protocol,
                        request.host,
                        handler.settings().base_url()
                    ),
                    tmpnb_mode: "false".into(),
                }
            }
        }
    }
}

/// Writes `Dockerfile`, `manifest.yml` and `README.md` into `output_dir`.
pub async fn bundle_meta(
    output_dir: &Path,
    notebook_name: &str,
    handler: &dyn RequestHandler,
    config: &KernelServiceConfig,
) -> Result<()> {
    let defaults = KernelDefaults::resolve(config, handler);
    log::debug!(
        "Kernel service for {notebook_name}: {} (tmpnb: {})",
        defaults.kernel_service_url,
        defaults.tmpnb_mode
    );

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    for (name, template) in [("Dockerfile", DOCKERFILE), ("manifest.yml", MANIFEST)] {
        handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::GenericError(format!("failed to register {name} template: {e}")))?;
    }

    let mut data = BTreeMap::new();
    data.insert("kernel_service_url", defaults.kernel_service_url);
    data.insert("tmpnb_mode", defaults.tmpnb_mode);
    data.insert("notebook_name", notebook_name.to_string());

    for name in ["Dockerfile", "manifest.yml"] {
        let rendered = handlebars
            .render(name, &data)
            .map_err(|e| Error::GenericError(format!("failed to render {name}: {e}")))?;
        fs::write_file(&output_dir.join(name), rendered).await?;
    }
    fs::write_file(&output_dir.join("README.md"), README).await
}
