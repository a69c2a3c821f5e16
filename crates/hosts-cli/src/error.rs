//! Error types for hosts-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end the program
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from hosts-core
    #[error(transparent)]
    Core(#[from] hosts_core::Error),

    /// Standard I/O error on the console
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
