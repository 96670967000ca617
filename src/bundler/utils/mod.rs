//! Shared helpers for bundlers.

pub mod fs;
pub mod http;
pub mod url;
