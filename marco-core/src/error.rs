//! Error types for marco

use thiserror::Error;

/// Result type alias for marco operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for marco operations
#[derive(Error, Debug)]
pub enum Error {
    /// `git clone` could not be run or exited unsuccessfully
    #[error("Clone failed: {0}")]
    CloneFailed(String),

    /// Tags could not be listed for a clone
    #[error("Tag listing failed: {0}")]
    TagListFailed(String),

    /// Merge commits could not be counted for a ref range
    #[error("Log failed: {0}")]
    LogFailed(String),

    /// The repo list could not be written back to the config file
    #[error("Failed to persist repos: {0}")]
    RegistryPersistFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed `user/repo` argument
    #[error("Invalid repo '{0}'. Expected format: <user>/<repo>")]
    InvalidRepo(String),

    /// Rejected import payload
    #[error("{0}")]
    Import(String),
}
