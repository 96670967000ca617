//! Upload to a Jupyter Dashboards Server.

use crate::bundler::{
    builder::make_upload_bundle,
    error::{Error, Result},
    handler::{RequestHandler, RequestInfo},
    notebook::notebook_name,
    settings::DashboardServerConfig,
    utils::{
        http::{self, UPLOAD_TIMEOUT, UploadRequest},
        url,
    },
};
use std::path::Path;

/// Upload endpoint below the server URL.
pub const UPLOAD_ENDPOINT: &[&str] = &["_api", "notebooks"];

/// Dashboard view endpoint below the server URL.
pub const VIEW_ENDPOINT: &[&str] = &["dashboards"];

/// Resolves the upload target for `dashboard_name` without touching the network.
pub fn prepare_upload(
    config: &DashboardServerConfig,
    request: &RequestInfo,
    dashboard_name: &str,
) -> Result<UploadRequest> {
    let server = server_root(config, request)?;
    let segments: Vec<&str> = UPLOAD_ENDPOINT.iter().copied().chain([dashboard_name]).collect();

    Ok(UploadRequest {
        url: url::join_segments(&server, &segments)?,
        authorization: config.auth_token.as_ref().map(|t| format!("token {t}")),
        verify_tls: config.verify_tls,
        timeout: UPLOAD_TIMEOUT,
    })
}

/// Where to send the browser after a successful upload.
///
/// A `link` in the server's JSON answer wins. Otherwise the redirect URL, or
/// the upload server, plus `/dashboards/<name>`.
pub fn redirect_link(
    config: &DashboardServerConfig,
    request: &RequestInfo,
    dashboard_name: &str,
    response_body: &str,
) -> Result<String> {
    let link = serde_json::from_str::<serde_json::Value>(response_body)
        .ok()
        .and_then(|body| body.get("link")?.as_str().map(String::from));
    if let Some(link) = link {
        return Ok(link);
    }

    let root = match &config.redirect_url {
        Some(redirect) => request.interpolate(redirect),
        None => server_root(config, request)?,
    };
    let segments: Vec<&str> = VIEW_ENDPOINT.iter().copied().chain([dashboard_name]).collect();
    url::join_segments(&root, &segments)
}

fn server_root(config: &DashboardServerConfig, request: &RequestInfo) -> Result<String> {
    match &config.server_url {
        Some(server) => Ok(request.interpolate(server)),
        None => {
            log::debug!("Can not deploy, DASHBOARD_SERVER_URL not set");
            Err(Error::NoServerConfigured)
        }
    }
}

/// Posts a bundle to the dashboard server and redirects to the result.
pub async fn send_file(
    handler: &mut dyn RequestHandler,
    file_path: &Path,
    dashboard_name: &str,
    config: &DashboardServerConfig,
) -> Result<()> {
    let request = prepare_upload(config, handler.request(), dashboard_name)?;
    let response = http::post_file(&request, file_path).await?;
    if response.status >= 400 {
        return Err(Error::RemoteStatus {
            status: response.status,
        });
    }

    let location = redirect_link(config, handler.request(), dashboard_name, &response.body)?;
    handler.redirect(&location);
    Ok(())
}

/// Bundles the notebook and uploads it.
pub async fn bundle(
    handler: &mut dyn RequestHandler,
    notebook_path: &Path,
    config: &DashboardServerConfig,
) -> Result<()> {
    let name = notebook_name(notebook_path)?;
    // Fail before staging anything.
    prepare_upload(config, handler.request(), &name)?;

    let tmp_dir = tempfile::tempdir()?;
    let staging_dir = tmp_dir.path().join(&name);
    let bundle_path = make_upload_bundle(
        notebook_path,
        &staging_dir,
        handler.tools(),
        handler.settings().locator(),
    )
    .await?;

    send_file(handler, &bundle_path, &name, config).await
}
