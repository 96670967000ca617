//! Dashboards bundler - runs a notebook dashboard bundler from the command line.
//!
//! Acts as a minimal host: builds the request context from flags, runs the
//! selected bundler and reports its redirect or writes its response body.

use dashboards_bundlers::{bundler::settings::warn_if_tls_verification_disabled, cli};
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();
    warn_if_tls_verification_disabled();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error ({}): {}", e.status_code(), e);
            1
        }
    };

    process::exit(exit_code);
}
