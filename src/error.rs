//! Error types for the command line host.
//!
//! Bundling failures are [`crate::bundler::Error`]; this module wraps them
//! together with argument and output errors for the binary.

use thiserror::Error;

/// Result type alias for host operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the command line host
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// No bundler registered under the requested name
    #[error("Unknown bundler: {name}")]
    UnknownBundler {
        /// Requested name
        name: String,
    },
}

impl BundlerError {
    /// HTTP status a web host would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            BundlerError::Bundler(e) => e.status_code(),
            BundlerError::Cli(_) => 400,
            BundlerError::Io(_) => 500,
        }
    }
}
