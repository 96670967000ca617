//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Runs a Jupyter dashboards bundler on a notebook
#[derive(Parser, Debug)]
#[command(
    name = "dashboards_bundler",
    version,
    about = "Runs a Jupyter dashboards bundler on a notebook",
    long_about = "Turns a notebook into a dashboard application and delivers it.

Deploy bundlers print the location they redirect to. Download bundlers write
the response body to --output.

Usage:
  dashboards_bundler --list
  dashboards_bundler -b dashboards_local_deploy -n analysis.ipynb
  dashboards_bundler -b dashboards_php_download -n analysis.ipynb -o analysis.zip
  DASHBOARD_SERVER_URL=http://dashboards:3000 dashboards_bundler -b dashboards_server_upload -n analysis.ipynb"
)]
pub struct Args {
    /// Registered bundler name, e.g. dashboards_local_deploy
    #[arg(short, long, value_name = "NAME", required_unless_present = "list")]
    pub bundler: Option<String>,

    /// Notebook to bundle, relative to the notebook directory
    #[arg(short, long, value_name = "PATH", required_unless_present = "list")]
    pub notebook: Option<PathBuf>,

    /// Content root of the notebook server
    #[arg(long, value_name = "DIR", default_value = ".", env = "JUPYTER_NOTEBOOK_DIR")]
    pub notebook_dir: PathBuf,

    /// Base URL the notebook server is mounted under
    #[arg(long, value_name = "URL", default_value = "/")]
    pub base_url: String,

    /// Host header of the originating request
    #[arg(long, value_name = "HOST[:PORT]", default_value = "localhost:8888")]
    pub host: String,

    /// Protocol of the originating request
    #[arg(long, value_name = "PROTOCOL", default_value = "http")]
    pub protocol: String,

    /// Jupyter data directories searched for notebook extensions
    ///
    /// When given, replaces the search path derived from the environment.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dirs: Vec<PathBuf>,

    /// Do not collect files referenced by the notebook
    #[arg(long)]
    pub no_references: bool,

    /// Where to write the response body of download bundlers
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// List the registered bundlers and exit
    #[arg(long)]
    pub list: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.list {
            return Ok(());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        let valid_protocols = ["http", "https"];
        if !valid_protocols.contains(&self.protocol.as_str()) {
            return Err(format!(
                "Invalid protocol: {}. Valid protocols: {}",
                self.protocol,
                valid_protocols.join(", ")
            ));
        }

        if !self.base_url.starts_with('/') {
            return Err(format!("Base URL must start with '/': {}", self.base_url));
        }

        Ok(())
    }
}
