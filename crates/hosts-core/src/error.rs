//! Error types for hosts-core

use std::path::PathBuf;

/// Result type for hosts-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while updating the hosts file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly requested configuration file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration values that cannot be used
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The process lacks the rights needed to edit the hosts file
    #[error("This program must be run as an administrator (or root)")]
    NotElevated,

    /// The pre-update snapshot could not be taken
    #[error("Failed to create a backup of the hosts file at {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: hosts_fs::Error,
    },

    /// Any failure while downloading the block-list
    #[error("Failed to download {url}: {message}")]
    Fetch { url: String, message: String },

    /// The download did not finish within the configured timeout
    #[error("Timed out after {timeout_secs}s downloading {url}")]
    FetchTimeout { url: String, timeout_secs: u64 },

    /// The server answered with a non-success status
    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// The name-resolution cache flush command failed
    #[error("Cache flush `{command}` failed: {message}")]
    Flush { command: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Block marker error from hosts-blocks
    #[error(transparent)]
    Blocks(#[from] hosts_blocks::Error),

    /// Filesystem error from hosts-fs
    #[error(transparent)]
    Fs(#[from] hosts_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
