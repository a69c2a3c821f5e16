//! Filesystem helpers for hosts-blocker
//!
//! Provides normalized path handling, atomic whole-file writes and
//! format-detecting configuration loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
