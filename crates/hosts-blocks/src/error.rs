//! Error types for hosts-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid block markers: {message}")]
    InvalidMarkers { message: String },

    #[error("Failed to build block pattern: {0}")]
    Pattern(#[from] regex::Error),
}
