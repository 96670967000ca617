//! Bundler registration.
//!
//! Hosts list [`BUNDLERS`] in their menus and dispatch by name through
//! [`find_bundler`].

use crate::bundler::{
    delivery::{local_deploy, php_download, server_download, server_upload},
    error::Result,
    handler::RequestHandler,
    settings::{DashboardServerConfig, KernelServiceConfig},
};
use std::{fmt, path::Path};

/// Menu a bundler appears under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundlerGroup {
    /// Publishes the dashboard somewhere and redirects to it.
    Deploy,
    /// Sends the dashboard back as a file.
    Download,
}

impl fmt::Display for BundlerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundlerGroup::Deploy => f.pad("deploy"),
            BundlerGroup::Download => f.pad("download"),
        }
    }
}

/// The available bundlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundlerKind {
    /// Static app in the notebook server's content root.
    LocalDeploy,
    /// Zip of a PHP app with deployment files.
    PhpDownload,
    /// Upload to a Jupyter Dashboards Server.
    ServerUpload,
    /// Zip or notebook ready for manual upload to a dashboards server.
    ServerDownload,
}

impl BundlerKind {
    /// Runs the bundler for one request.
    ///
    /// Environment-derived configuration is read here, once per request.
    pub async fn bundle(self, handler: &mut dyn RequestHandler, notebook_path: &Path) -> Result<()> {
        let notebook_path = handler.settings().resolve_notebook(notebook_path)?;
        log::info!("Running {} for {}", self.name(), notebook_path.display());

        match self {
            BundlerKind::LocalDeploy => local_deploy::bundle(handler, &notebook_path).await,
            BundlerKind::PhpDownload => {
                php_download::bundle(handler, &notebook_path, &KernelServiceConfig::from_env()).await
            }
            BundlerKind::ServerUpload => {
                server_upload::bundle(handler, &notebook_path, &DashboardServerConfig::from_env())
                    .await
            }
            BundlerKind::ServerDownload => server_download::bundle(handler, &notebook_path).await,
        }
    }

    /// Registered name of this bundler.
    pub fn name(self) -> &'static str {
        BUNDLERS
            .iter()
            .find(|entry| entry.kind == self)
            .map(|entry| entry.name)
            .unwrap_or_default()
    }
}

/// One row of the bundler registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundlerEntry {
    /// Unique identifier hosts dispatch on.
    pub name: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// Menu group.
    pub group: BundlerGroup,
    /// Implementation.
    pub kind: BundlerKind,
}

/// Every bundler this crate provides.
pub static BUNDLERS: &[BundlerEntry] = &[
    BundlerEntry {
        name: "dashboards_local_deploy",
        label: "Local Dashboard",
        group: BundlerGroup::Deploy,
        kind: BundlerKind::LocalDeploy,
    },
    BundlerEntry {
        name: "dashboards_php_download",
        label: "PHP Dashboard bundle (.zip)",
        group: BundlerGroup::Download,
        kind: BundlerKind::PhpDownload,
    },
    BundlerEntry {
        name: "dashboards_server_upload",
        label: "Dashboard on Jupyter Dashboards Server",
        group: BundlerGroup::Deploy,
        kind: BundlerKind::ServerUpload,
    },
    BundlerEntry {
        name: "dashboards_server_download",
        label: "Jupyter Dashboards Server bundle (.zip)",
        group: BundlerGroup::Download,
        kind: BundlerKind::ServerDownload,
    },
];

/// Looks a bundler up by its registered name.
pub fn find_bundler(name: &str) -> Option<&'static BundlerEntry> {
    BUNDLERS.iter().find(|entry| entry.name == name)
}
