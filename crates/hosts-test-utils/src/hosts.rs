//! [`TestHosts`] fixture for hosts-blocker test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use hosts_core::BlockerConfig;
use tempfile::TempDir;

/// Content of a freshly created test hosts file.
pub const DEFAULT_HOSTS: &str = "127.0.0.1 localhost\n::1 localhost\n";

/// URL used by [`TestHosts::config`]. Nothing listens there; pair it with a
/// fake fetcher.
pub const TEST_SOURCE_URL: &str = "http://blocklist.test/hosts.txt";

/// A temporary directory holding a hosts file, a backup directory and a
/// configuration pointing at both.
///
/// # Example
///
/// ```rust,no_run
/// use hosts_test_utils::TestHosts;
///
/// let hosts = TestHosts::new();
/// hosts.write_hosts("10.0.0.1 nas\n");
/// assert!(hosts.backups().is_empty());
/// ```
pub struct TestHosts {
    temp_dir: TempDir,
}

impl Default for TestHosts {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHosts {
    /// Create a hosts file containing [`DEFAULT_HOSTS`].
    pub fn new() -> Self {
        Self::with_content(DEFAULT_HOSTS)
    }

    /// Create a hosts file with the given content.
    pub fn with_content(content: &str) -> Self {
        let hosts = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        hosts.write_hosts(content);
        hosts
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn hosts_path(&self) -> PathBuf {
        self.root().join("hosts")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root().join("backups")
    }

    /// Configuration targeting this fixture: no elevation check, no cache
    /// flush command, [`TEST_SOURCE_URL`] as the source.
    pub fn config(&self) -> BlockerConfig {
        BlockerConfig {
            hosts_path: self.hosts_path(),
            backup_dir: self.backup_dir(),
            source_url: TEST_SOURCE_URL.to_string(),
            flush_command: Vec::new(),
            require_elevation: false,
            ..BlockerConfig::default()
        }
    }

    /// Save `config` as `config.toml` in the fixture root and return its path.
    pub fn write_config(&self, config: &BlockerConfig) -> PathBuf {
        let path = self.root().join("config.toml");
        config.save(&path).unwrap();
        path
    }

    pub fn read_hosts(&self) -> String {
        fs::read_to_string(self.hosts_path()).unwrap()
    }

    pub fn write_hosts(&self, content: &str) {
        fs::write(self.hosts_path(), content).unwrap();
    }

    /// Names of the files in the backup directory, sorted.
    pub fn backups(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.backup_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Read a backup by file name.
    pub fn read_backup(&self, name: &str) -> String {
        fs::read_to_string(self.backup_dir().join(name)).unwrap()
    }
}
