//! Dashboard bundlers for Jupyter notebooks.
//!
//! This library turns a notebook into a dashboard application and delivers it:
//! - as a static app served by the notebook server (`dashboards_local_deploy`)
//! - as a downloadable PHP app with Docker and Cloud Foundry files (`dashboards_php_download`)
//! - as an upload to a Jupyter Dashboards Server (`dashboards_server_upload`)
//! - as a download of that upload (`dashboards_server_download`)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
