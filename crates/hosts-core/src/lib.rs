//! Hosts file update orchestration for hosts-blocker
//!
//! This crate wires the managed block merger from `hosts-blocks` to the
//! collaborators around it:
//!
//! - **Configuration**: [`BlockerConfig`], loaded from TOML
//! - **Privilege check**: [`privilege::ensure_elevated`]
//! - **Backups**: [`BackupManager`] takes timestamped snapshots before writes
//! - **Download**: the [`Fetcher`] trait and its [`HttpFetcher`] implementation
//! - **Cache flush**: the [`CacheFlusher`] trait and [`CommandFlusher`]
//! - **Orchestration**: [`HostsUpdater`] runs add/update and remove
//!
//! ```text
//!                 hosts-cli
//!                     |
//!                hosts-core
//!                 /        \
//!         hosts-blocks   hosts-fs
//! ```

pub mod backup;
pub mod config;
pub mod error;
pub mod fetch;
pub mod flush;
pub mod privilege;
pub mod updater;

pub use backup::{BackupId, BackupManager};
pub use config::{BackupConfig, BlockerConfig, FetchConfig, MarkerConfig};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use flush::{CacheFlusher, CommandFlusher};
pub use updater::{FlushOutcome, HostsStatus, HostsUpdater, UpdateReport};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_config_not_found_displays_path() {
        let error = Error::ConfigNotFound {
            path: PathBuf::from("/etc/hosts-blocker/config.toml"),
        };
        assert!(error.to_string().contains("/etc/hosts-blocker/config.toml"));
    }

    #[test]
    fn error_fetch_timeout_mentions_url() {
        let error = Error::FetchTimeout {
            url: "https://winhelp2002.mvps.org/hosts.txt".into(),
            timeout_secs: 30,
        };
        let display = error.to_string();
        assert!(display.contains("30s"));
        assert!(display.contains("mvps.org"));
    }
}
