//! Configuration for hosts-blocker
//!
//! Every path, URL and marker the tool uses comes from a [`BlockerConfig`]
//! value handed to the collaborators at construction time. Values are read
//! from a TOML file; anything missing falls back to the platform defaults
//! in [`defaults`].
//!
//! # Lookup
//!
//! 1. An explicit `--config` path, which must exist
//! 2. `<config dir>/hosts-blocker/config.toml` (e.g. `~/.config` on Linux)
//! 3. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! hosts_path = "/etc/hosts"
//! backup_dir = "/etc/hosts-backups"
//! source_url = "https://winhelp2002.mvps.org/hosts.txt"
//! flush_command = ["resolvectl", "flush-caches"]
//!
//! [fetch]
//! timeout_secs = 30
//!
//! [backup]
//! keep = 10
//! ```

pub mod defaults;
mod settings;

pub use settings::{BackupConfig, BlockerConfig, FetchConfig, MarkerConfig, default_config_path};
