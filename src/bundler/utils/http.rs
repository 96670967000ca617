//! HTTP utilities for dashboard server uploads.
//!
//! Provides a single multipart POST of a bundle file.

use crate::bundler::error::{Error, ErrorExt, Result};
use reqwest::multipart::{Form, Part};
use std::{path::Path, time::Duration};

/// Upload timeout applied to the whole request.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything needed to POST a bundle, resolved before any network IO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Fully interpolated upload endpoint.
    pub url: String,
    /// Value of the `Authorization` header, if any.
    pub authorization: Option<String>,
    /// Whether TLS certificates are verified.
    pub verify_tls: bool,
    /// Request timeout.
    pub timeout: Duration,
}

/// Raw response of an upload.
#[derive(Debug, Clone)]
pub struct UploadResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

/// Posts `file_path` as multipart field `file`.
///
/// Non-success statuses are returned, not raised; the caller decides.
pub async fn post_file(request: &UploadRequest, file_path: &Path) -> Result<UploadResponse> {
    log::info!("Uploading {} to {}", file_path.display(), request.url);

    let data = tokio::fs::read(file_path)
        .await
        .fs_context("reading bundle", file_path)?;
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());

    let form = Form::new().part("file", Part::bytes(data).file_name(file_name));

    let client = reqwest::Client::builder()
        .timeout(request.timeout)
        .danger_accept_invalid_certs(!request.verify_tls)
        .build()?;

    let mut builder = client.post(&request.url).multipart(form);
    if let Some(auth) = &request.authorization {
        builder = builder.header(reqwest::header::AUTHORIZATION, auth);
    }

    let response = builder.send().await.map_err(Error::Http)?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    log::debug!("Dashboard server answered {} with {} bytes", status, body.len());

    Ok(UploadResponse { status, body })
}
