//! URL helpers for redirects and upload endpoints.

use crate::bundler::error::Result;
use url::Url;

/// Appends percent-encoded path segments to an absolute URL.
///
/// Empty segments are skipped, so a trailing slash on `base` never yields `//`.
pub fn join_segments(base: &str, segments: &[&str]) -> Result<String> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| crate::bundler::Error::GenericError(format!("{base} cannot be a base URL")))?;
        path.pop_if_empty();
        path.extend(segments.iter().filter(|s| !s.is_empty()));
    }
    Ok(url.into())
}

/// Joins a server-relative base path (e.g. `/` or `/user/me/`) with
/// percent-encoded segments, returning an absolute path.
pub fn join_path(base_path: &str, segments: &[&str]) -> Result<String> {
    let mut url = Url::parse("http://localhost/")?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| crate::bundler::Error::GenericError("invalid base path".into()))?;
        path.clear();
        path.extend(base_path.split('/').filter(|s| !s.is_empty()));
        path.extend(segments.iter().filter(|s| !s.is_empty()));
    }
    Ok(url.path().to_string())
}
