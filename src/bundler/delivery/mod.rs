//! Delivery backends, one per registered bundler.

pub mod local_deploy;
pub mod php_download;
pub mod server_download;
pub mod server_upload;
