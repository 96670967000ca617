//! Dashboard bundlers for Jupyter notebooks.
//!
//! A bundler turns one notebook into a dashboard application and delivers it
//! through the host's [`RequestHandler`]: as a local static app, a PHP
//! download, an upload to a Jupyter Dashboards Server, or a download of that
//! upload.
//!
//! # Example
//!
//! ```no_run
//! use dashboards_bundlers::bundler::{
//!     RecordingHandler, RequestInfo, SettingsBuilder, find_bundler,
//! };
//! use std::path::Path;
//!
//! # async fn example() -> dashboards_bundlers::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .root_dir("/srv/notebooks")
//!     .base_url("/")
//!     .build()?;
//! let mut handler = RecordingHandler::new(settings, RequestInfo::new("localhost:8888", "http"), None);
//!
//! let entry = find_bundler("dashboards_local_deploy").expect("registered");
//! entry.kind.bundle(&mut handler, Path::new("analysis.ipynb")).await?;
//! println!("{:?}", handler.location);
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod builder;
pub mod convert;
pub mod delivery;
pub mod error;
pub mod handler;
pub mod notebook;
pub mod registry;
pub mod settings;
pub mod utils;

pub use assets::{BundlerTools, ExtensionLocator, FileReferenceTools};
pub use builder::make_upload_bundle;
pub use convert::Converter;
pub use error::{Error, Result};
pub use handler::{RecordingHandler, RequestHandler, RequestInfo};
pub use registry::{BUNDLERS, BundlerEntry, BundlerGroup, BundlerKind, find_bundler};
pub use settings::{DashboardServerConfig, KernelServiceConfig, Settings, SettingsBuilder};
