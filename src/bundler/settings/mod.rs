//! Configuration for bundling operations.
//!
//! [`Settings`] is the host-level configuration shared by every request,
//! built through [`SettingsBuilder`]. The `*Config` types are resolved from
//! the environment once per request.

mod builder;
mod core;
pub mod env;

pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use env::{DashboardServerConfig, KernelServiceConfig, warn_if_tls_verification_disabled};
