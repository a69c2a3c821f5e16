//! The `BlockerConfig` structure and its loading rules

use std::path::{Path, PathBuf};
use std::time::Duration;

use hosts_blocks::{DEFAULT_END_MARKER, DEFAULT_START_MARKER, Markers};
use hosts_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::{Error, Result};

/// Markers bounding the managed block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub start: String,
    pub end: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl MarkerConfig {
    /// Validate and compile into [`Markers`].
    pub fn to_markers(&self) -> Result<Markers> {
        Ok(Markers::new(self.start.as_str(), self.end.as_str())?)
    }
}

/// Download settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total time allowed for the request, connection included
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::TIMEOUT_SECS,
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Backup retention
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Number of snapshots to keep. `None` keeps every snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep: Option<usize>,
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockerConfig {
    /// The hosts file to edit
    pub hosts_path: PathBuf,
    /// Where `hosts.backup.<timestamp>` snapshots are written
    pub backup_dir: PathBuf,
    /// Block-list installed inside the managed block
    pub source_url: String,
    /// Command and arguments run after each write. Empty disables flushing.
    pub flush_command: Vec<String>,
    /// Refuse to start without administrator/root rights
    pub require_elevation: bool,
    pub markers: MarkerConfig,
    pub fetch: FetchConfig,
    pub backup: BackupConfig,
}

impl Default for BlockerConfig {
    fn default() -> Self {
        Self {
            hosts_path: defaults::hosts_path(),
            backup_dir: defaults::backup_dir(),
            source_url: defaults::SOURCE_URL.to_string(),
            flush_command: defaults::flush_command(),
            require_elevation: true,
            markers: MarkerConfig::default(),
            fetch: FetchConfig::default(),
            backup: BackupConfig::default(),
        }
    }
}

impl BlockerConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] when the file is missing, a
    /// filesystem error when it cannot be parsed, and
    /// [`Error::InvalidConfig`] when a value is unusable.
    pub fn load(path: &Path) -> Result<Self> {
        let path = NormalizedPath::new(path);
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }

        let config: Self = ConfigStore::new().load(&path)?;
        config.validate()?;
        tracing::debug!(path = %path, "Loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given, else the per-user config file if present,
    /// else the built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write this configuration as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(&NormalizedPath::new(path), self)?;
        Ok(())
    }

    /// Check values that serde alone cannot reject.
    pub fn validate(&self) -> Result<()> {
        if self.hosts_path.as_os_str().is_empty() {
            return Err(invalid("hosts_path is empty"));
        }
        if self.backup_dir.as_os_str().is_empty() {
            return Err(invalid("backup_dir is empty"));
        }
        if self.source_url.trim().is_empty() {
            return Err(invalid("source_url is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(invalid("fetch.timeout_secs must be at least 1"));
        }
        if self.backup.keep == Some(0) {
            return Err(invalid("backup.keep must be at least 1"));
        }
        self.markers.to_markers()?;
        Ok(())
    }

    pub fn hosts_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.hosts_path)
    }

    pub fn backup_dir(&self) -> NormalizedPath {
        NormalizedPath::new(&self.backup_dir)
    }
}

/// `<config dir>/hosts-blocker/config.toml`, when the platform has a config
/// directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR).join("config.toml"))
}

fn invalid(message: &str) -> Error {
    Error::InvalidConfig {
        message: message.to_string(),
    }
}
