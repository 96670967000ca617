//! Bundle assembly.
//!
//! - [`assemble`] - builds the upload artifact for a notebook
//! - [`archive`] - zips a staging directory

mod archive;
mod assemble;

pub use archive::zip_dir;
pub use assemble::{INDEX_NOTEBOOK, make_upload_bundle};
