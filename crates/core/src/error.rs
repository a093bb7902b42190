//! Error types for s3t-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for s3t-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3-tester operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid connection setting
    #[error("{0}")]
    Config(String),

    /// Wrong positional arguments
    #[error("{0}")]
    Usage(String),

    /// Local file could not be inspected
    #[error("File '{}' does not exist: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local file could not be opened for reading
    #[error("Failed to open file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// URL parsing error
    #[error("Invalid S3 endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Usage(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::Network(_) => 3,                                          // NetworkError
            Error::Auth(_) => 4,                                             // AuthError
            Error::NotFound(_) => 5,                                         // NotFound
            Error::Stat { source, .. } if source.kind() == std::io::ErrorKind::NotFound => 5,
            _ => 1, // GeneralError
        }
    }
}
