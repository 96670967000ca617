//! The request context a host hands to a bundler.

use crate::bundler::{assets::BundlerTools, settings::Settings};
use std::sync::Arc;

/// Origin of the request that triggered a bundle, used for self-referencing URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// `Host` header, e.g. `notebook-server:8888`.
    pub host: String,
    /// `http` or `https`.
    pub protocol: String,
}

impl RequestInfo {
    /// Creates request info from a host header and protocol.
    pub fn new(host: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            protocol: protocol.into(),
        }
    }

    /// Host name without the port.
    pub fn hostname(&self) -> &str {
        self.host.split(':').next().unwrap_or_default()
    }

    /// Port from the host header, or an empty string.
    pub fn port(&self) -> &str {
        self.host.split(':').nth(1).unwrap_or_default()
    }

    /// Fills `{protocol}`, `{hostname}` and `{port}` in a URL template.
    pub fn interpolate(&self, template: &str) -> String {
        template
            .replace("{protocol}", &self.protocol)
            .replace("{hostname}", self.hostname())
            .replace("{port}", self.port())
    }
}

/// Everything a bundler may use from the host for one request.
///
/// Response methods mirror a web handler: headers, body chunks, `finish`,
/// or a redirect.
pub trait RequestHandler {
    /// Host settings.
    fn settings(&self) -> &Settings;

    /// Information about the current request.
    fn request(&self) -> &RequestInfo;

    /// Reference collection tools, when the host provides them.
    fn tools(&self) -> Option<Arc<dyn BundlerTools>>;

    /// Sets a response header.
    fn set_header(&mut self, name: &str, value: &str);

    /// Appends to the response body.
    fn write(&mut self, chunk: &[u8]);

    /// Completes the response.
    fn finish(&mut self);

    /// Redirects the browser.
    fn redirect(&mut self, location: &str);
}

/// Handler that keeps the response in memory.
///
/// Used by the command line host, which writes the recorded body to a file
/// or prints the redirect once the bundler returns.
pub struct RecordingHandler {
    settings: Settings,
    request: RequestInfo,
    tools: Option<Arc<dyn BundlerTools>>,
    /// Headers in the order they were set.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
    /// Whether `finish` was called.
    pub finished: bool,
    /// Redirect target, if any.
    pub location: Option<String>,
}

impl std::fmt::Debug for RecordingHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingHandler")
            .field("settings", &self.settings)
            .field("request", &self.request)
            .field("tools", &self.tools.as_ref().map(|_| "<BundlerTools>"))
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("finished", &self.finished)
            .field("location", &self.location)
            .finish()
    }
}

impl RecordingHandler {
    /// Creates a handler with an empty response.
    pub fn new(
        settings: Settings,
        request: RequestInfo,
        tools: Option<Arc<dyn BundlerTools>>,
    ) -> Self {
        Self {
            settings,
            request,
            tools,
            headers: Vec::new(),
            body: Vec::new(),
            finished: false,
            location: None,
        }
    }

    /// Last value set for a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl RequestHandler for RecordingHandler {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn request(&self) -> &RequestInfo {
        &self.request
    }

    fn tools(&self) -> Option<Arc<dyn BundlerTools>> {
        self.tools.clone()
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn write(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    fn finish(&mut self) {
        self.finished = true;
    }

    fn redirect(&mut self, location: &str) {
        log::debug!("Redirecting to {location}");
        self.location = Some(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_request_origin() {
        let req = RequestInfo::new("notebook-server:8888", "https");
        assert_eq!(
            req.interpolate("{protocol}://{hostname}:8889"),
            "https://notebook-server:8889"
        );
        assert_eq!(req.interpolate("http://x:{port}/"), "http://x:8888/");
    }

    #[test]
    fn records_response() {
        let settings = crate::bundler::SettingsBuilder::new()
            .root_dir("/srv/notebooks")
            .build()
            .unwrap();
        let mut handler = RecordingHandler::new(settings, RequestInfo::new("h:1", "http"), None);

        handler.set_header("Content-Type", "text/plain");
        handler.set_header("content-type", "application/zip");
        handler.write(b"ab");
        handler.write(b"c");
        handler.finish();

        assert_eq!(handler.header("CONTENT-TYPE"), Some("application/zip"));
        assert_eq!(handler.body, b"abc");
        assert!(handler.finished);
        assert!(handler.tools().is_none());
    }

    #[test]
    fn host_without_port() {
        let req = RequestInfo::new("example.org", "http");
        assert_eq!(req.hostname(), "example.org");
        assert_eq!(req.port(), "");
    }
}
