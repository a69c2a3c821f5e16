//! Platform-specific default values.

use std::path::PathBuf;

/// Block-list downloaded when no `source_url` is configured.
pub const SOURCE_URL: &str = "https://winhelp2002.mvps.org/hosts.txt";

pub const USER_AGENT: &str = "HostsUpdater/1.0";

pub const TIMEOUT_SECS: u64 = 30;

/// Directory name under the user config directory.
pub const APP_DIR: &str = "hosts-blocker";

pub fn hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

pub fn backup_dir() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\backups")
    } else {
        PathBuf::from("/etc/hosts-backups")
    }
}

/// Command that flushes the OS name-resolution cache.
pub fn flush_command() -> Vec<String> {
    let parts: &[&str] = if cfg!(windows) {
        &["ipconfig", "/flushdns"]
    } else if cfg!(target_os = "macos") {
        &["dscacheutil", "-flushcache"]
    } else {
        &["resolvectl", "flush-caches"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}
