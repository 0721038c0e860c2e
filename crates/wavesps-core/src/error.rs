//! Library errors

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while setting up the dashboard
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or unreadable dashboard config
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Preference store or config file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for setup operations
pub type Result<T> = std::result::Result<T, Error>;
