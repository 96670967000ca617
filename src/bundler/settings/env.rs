//! Per-request configuration read from environment variables.
//!
//! Values are looked up through a closure so callers (and tests) can supply
//! something other than the process environment.

/// Dashboard server upload target.
pub const DASHBOARD_SERVER_URL: &str = "DASHBOARD_SERVER_URL";
/// Token sent as `Authorization: token <value>`.
pub const DASHBOARD_SERVER_AUTH_TOKEN: &str = "DASHBOARD_SERVER_AUTH_TOKEN";
/// Public dashboard server URL used for redirects.
pub const DASHBOARD_REDIRECT_URL: &str = "DASHBOARD_REDIRECT_URL";
/// `yes` or `true` disables TLS certificate verification.
pub const DASHBOARD_SERVER_NO_SSL_VERIFY: &str = "DASHBOARD_SERVER_NO_SSL_VERIFY";
/// Kernel provider written into downloaded bundles.
pub const KERNEL_SERVICE_URL: &str = "KERNEL_SERVICE_URL";
/// Whether the kernel provider is a tmpnb deployment.
pub const TMPNB_MODE: &str = "TMPNB_MODE";

/// Settings for talking to a Jupyter Dashboards Server.
///
/// URL values are templates that may contain `{protocol}`, `{hostname}`
/// and `{port}`, filled in from the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardServerConfig {
    /// Upload server URL template. Empty counts as unset.
    pub server_url: Option<String>,
    /// Auth token. Empty counts as unset.
    pub auth_token: Option<String>,
    /// Redirect URL template.
    pub redirect_url: Option<String>,
    /// Whether TLS certificates are verified. On unless explicitly disabled.
    pub verify_tls: bool,
}

impl Default for DashboardServerConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            auth_token: None,
            redirect_url: None,
            verify_tls: true,
        }
    }
}

impl DashboardServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            server_url: non_empty(DASHBOARD_SERVER_URL),
            auth_token: non_empty(DASHBOARD_SERVER_AUTH_TOKEN),
            redirect_url: non_empty(DASHBOARD_REDIRECT_URL),
            verify_tls: !skip_tls_verification(lookup(DASHBOARD_SERVER_NO_SSL_VERIFY).as_deref()),
        }
    }
}

/// True when the opt-out flag is `yes` or `true`, case-insensitively.
pub fn skip_tls_verification(flag: Option<&str>) -> bool {
    flag.is_some_and(|v| v.eq_ignore_ascii_case("yes") || v.eq_ignore_ascii_case("true"))
}

/// Logs a warning once at startup if TLS verification is turned off.
pub fn warn_if_tls_verification_disabled() {
    if !DashboardServerConfig::from_env().verify_tls {
        log::warn!("Dashboard server SSL verification disabled");
    }
}

/// Kernel service settings written into downloadable bundles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelServiceConfig {
    /// Kernel provider URL.
    pub kernel_service_url: Option<String>,
    /// tmpnb mode flag, passed through verbatim.
    pub tmpnb_mode: Option<String>,
}

impl KernelServiceConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            kernel_service_url: lookup(KERNEL_SERVICE_URL),
            tmpnb_mode: lookup(TMPNB_MODE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn tls_verification_defaults_to_on() {
        let config = DashboardServerConfig::from_lookup(lookup(&[]));
        assert!(config.verify_tls);
        assert_eq!(config, DashboardServerConfig::default());
    }

    #[test]
    fn tls_opt_out_is_case_insensitive() {
        for flag in ["yes", "YES", "true", "True"] {
            let config =
                DashboardServerConfig::from_lookup(lookup(&[(DASHBOARD_SERVER_NO_SSL_VERIFY, flag)]));
            assert!(!config.verify_tls, "{flag} should disable verification");
        }
        for flag in ["no", "1", ""] {
            let config =
                DashboardServerConfig::from_lookup(lookup(&[(DASHBOARD_SERVER_NO_SSL_VERIFY, flag)]));
            assert!(config.verify_tls, "{flag} should keep verification");
        }
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = DashboardServerConfig::from_lookup(lookup(&[
            (DASHBOARD_SERVER_URL, ""),
            (DASHBOARD_SERVER_AUTH_TOKEN, ""),
        ]));
        assert!(config.server_url.is_none());
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn kernel_values_pass_through() {
        let config = KernelServiceConfig::from_lookup(lookup(&[
            (KERNEL_SERVICE_URL, "http://another-fake:8888/"),
            (TMPNB_MODE, "true"),
        ]));
        assert_eq!(config.kernel_service_url.as_deref(), Some("http://another-fake:8888/"));
        assert_eq!(config.tmpnb_mode.as_deref(), Some("true"));
    }
}
