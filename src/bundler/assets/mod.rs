//! Asset collection for bundles.
//!
//! - [`locator`] - finds installed notebook extensions
//! - [`references`] - files a notebook declares it needs
//! - [`statics`] - frontend files for dashboard web apps
//! - [`widgets`] - optional declarative widgets

pub mod locator;
pub mod references;
pub mod statics;
pub mod widgets;

pub use locator::ExtensionLocator;
pub use references::{BundlerTools, FileReferenceTools, bundle_file_references};
pub use statics::bundle_web_static;
pub use widgets::bundle_declarative_widgets;
