//! Error types for bundling operations.
//!
//! Every failure a bundler can report is one variant of [`Error`]. The
//! variant decides the HTTP status surfaced to the requester through
//! [`Error::status_code`].

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while assembling or delivering a bundle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catch-all error with a human readable message.
    #[error("{0}")]
    GenericError(String),

    /// Error with an attached context message.
    #[error("{context}: {source}")]
    Context {
        /// What was being done when the error happened
        context: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Raw IO error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// IO error on a specific path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: io::Error,
    },

    /// An external command could not be started.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command name
        command: String,
        /// Spawn error
        #[source]
        error: io::Error,
    },

    /// The notebook converter wrote to stderr.
    #[error("nbconvert wrote to stderr: {stderr}")]
    ConverterStderr {
        /// Captured stderr text
        stderr: String,
    },

    /// A mandatory notebook extension is not installed.
    #[error("Missing {name} extension")]
    MissingExtension {
        /// Extension display name
        name: &'static str,
    },

    /// `DASHBOARD_SERVER_URL` is not set.
    #[error("No dashboard server configured")]
    NoServerConfigured,

    /// The dashboard server rejected the upload.
    #[error("dashboard server responded with HTTP {status}")]
    RemoteStatus {
        /// Status code returned by the server
        status: u16,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed URL after template interpolation.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Notebook or response JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Archive creation failure.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failure.
    #[error("directory walk failed: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping failure.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Invalid file reference pattern.
    #[error("invalid file reference pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// HTTP status code a host should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::RemoteStatus { status } => *status,
            Error::Context { source, .. } => source.status_code(),
            _ => 500,
        }
    }
}

/// Attaches a path to IO errors.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the operation and path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Adds context messages to results and options.
pub trait Context<T> {
    /// Attaches a static context message.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Attaches a lazily built context message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: context.to_string(),
            source: Box::new(e),
        })
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: f().to_string(),
            source: Box::new(e),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
