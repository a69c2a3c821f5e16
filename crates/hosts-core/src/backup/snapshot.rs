//! Snapshot creation, listing and pruning

use std::fmt;
use std::fs;

use chrono::{DateTime, Local};
use hosts_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Timestamp layout used in snapshot names.
const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Identifies one snapshot on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupId {
    /// File name, e.g. `hosts.backup.20241005143012`
    pub name: String,
    /// Full path of the snapshot
    pub path: NormalizedPath,
}

impl fmt::Display for BackupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// Creates and manages snapshots in a single backup directory
#[derive(Debug, Clone)]
pub struct BackupManager {
    dir: NormalizedPath,
    keep: Option<usize>,
}

impl BackupManager {
    /// Create a manager writing into `dir`, keeping at most `keep` snapshots
    /// per source file (`None` keeps all).
    pub fn new(dir: NormalizedPath, keep: Option<usize>) -> Self {
        Self { dir, keep }
    }

    pub fn dir(&self) -> &NormalizedPath {
        &self.dir
    }

    /// Snapshot `source` using the current local time.
    pub fn snapshot(&self, source: &NormalizedPath) -> Result<BackupId> {
        self.snapshot_at(source, Local::now())
    }

    /// Snapshot `source` under the timestamp `now`.
    ///
    /// A second snapshot within the same second gets a `-1`, `-2`, ...
    /// suffix; existing snapshots are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backup`] when the copy fails. Callers must not write
    /// to `source` in that case.
    pub fn snapshot_at(&self, source: &NormalizedPath, now: DateTime<Local>) -> Result<BackupId> {
        let base = format!("{}{}", prefix(source), now.format(STAMP_FORMAT));

        let mut name = base.clone();
        let mut suffix = 1;
        while self.dir.join(&name).exists() {
            name = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        let path = self.dir.join(&name);
        let bytes = io::copy_exclusive(source, &path).map_err(|e| Error::Backup {
            path: path.to_native(),
            source: e,
        })?;

        tracing::info!(backup = %path, bytes, "Created hosts file backup");
        Ok(BackupId { name, path })
    }

    /// List snapshots of `source`, oldest first.
    pub fn list(&self, source: &NormalizedPath) -> Result<Vec<BackupId>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = prefix(source);
        let mut found = Vec::new();

        for entry in fs::read_dir(self.dir.to_native())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if let Some(key) = sort_key(&name, &prefix) {
                found.push((key, name));
            }
        }

        found.sort();
        Ok(found
            .into_iter()
            .map(|(_, name)| BackupId {
                path: self.dir.join(&name),
                name,
            })
            .collect())
    }

    /// Delete the oldest snapshots of `source` beyond the retention limit.
    ///
    /// Returns the removed snapshots. Does nothing when no limit is set.
    pub fn prune(&self, source: &NormalizedPath) -> Result<Vec<BackupId>> {
        let Some(keep) = self.keep else {
            return Ok(Vec::new());
        };

        let backups = self.list(source)?;
        let excess = backups.len().saturating_sub(keep);
        let mut removed = Vec::with_capacity(excess);

        for backup in backups.into_iter().take(excess) {
            fs::remove_file(backup.path.to_native())?;
            tracing::debug!(backup = %backup, "Pruned old backup");
            removed.push(backup);
        }

        Ok(removed)
    }
}

fn prefix(source: &NormalizedPath) -> String {
    format!("{}.backup.", source.file_name().unwrap_or("hosts"))
}

/// `(timestamp, collision suffix)` for a snapshot name, or `None` when the
/// name is not a snapshot of this source.
fn sort_key(name: &str, prefix: &str) -> Option<(String, u32)> {
    let rest = name.strip_prefix(prefix)?;
    let (stamp, suffix) = match rest.split_once('-') {
        Some((stamp, suffix)) => (stamp, suffix.parse().ok()?),
        None => (rest, 0),
    };
    if stamp.len() != 14 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((stamp.to_string(), suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn setup() -> (TempDir, NormalizedPath, BackupManager) {
        let temp = TempDir::new().unwrap();
        let hosts = NormalizedPath::new(temp.path().join("hosts"));
        fs::write(hosts.to_native(), "127.0.0.1 localhost\n").unwrap();
        let manager = BackupManager::new(NormalizedPath::new(temp.path().join("backups")), None);
        (temp, hosts, manager)
    }

    fn at(secs: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 10, 5, 14, 30, secs).unwrap()
    }

    #[test]
    fn test_snapshot_name_uses_timestamp() {
        let (_temp, hosts, manager) = setup();

        let backup = manager.snapshot_at(&hosts, at(12)).unwrap();

        assert_eq!(backup.name, "hosts.backup.20241005143012");
        assert_eq!(
            fs::read_to_string(backup.path.to_native()).unwrap(),
            "127.0.0.1 localhost\n"
        );
    }

    #[test]
    fn test_same_second_gets_suffix() {
        let (_temp, hosts, manager) = setup();

        let first = manager.snapshot_at(&hosts, at(0)).unwrap();
        let second = manager.snapshot_at(&hosts, at(0)).unwrap();

        assert_eq!(first.name, "hosts.backup.20241005143000");
        assert_eq!(second.name, "hosts.backup.20241005143000-1");
    }

    #[test]
    fn test_snapshot_of_missing_source_fails() {
        let (temp, _hosts, manager) = setup();
        let missing = NormalizedPath::new(temp.path().join("absent"));

        let err = manager.snapshot_at(&missing, at(0)).unwrap_err();
        assert!(matches!(err, Error::Backup { .. }));
    }

    #[test]
    fn test_list_orders_oldest_first_and_ignores_strangers() {
        let (_temp, hosts, manager) = setup();
        for _ in 0..11 {
            manager.snapshot_at(&hosts, at(5)).unwrap();
        }
        manager.snapshot_at(&hosts, at(1)).unwrap();
        fs::write(manager.dir().join("notes.txt").to_native(), "x").unwrap();
        fs::write(manager.dir().join("hosts.backup.bogus").to_native(), "x").unwrap();

        let names: Vec<_> = manager
            .list(&hosts)
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "hosts.backup.20241005143001");
        assert_eq!(names[1], "hosts.backup.20241005143005");
        assert_eq!(names[2], "hosts.backup.20241005143005-1");
        assert_eq!(names[11], "hosts.backup.20241005143005-10");
    }

    #[test]
    fn test_list_without_directory_is_empty() {
        let (_temp, hosts, manager) = setup();
        assert!(manager.list(&hosts).unwrap().is_empty());
    }

    #[test]
    fn test_prune_keeps_newest() {
        let (temp, hosts, _) = setup();
        let manager = BackupManager::new(NormalizedPath::new(temp.path().join("backups")), Some(2));
        for secs in 0..4 {
            manager.snapshot_at(&hosts, at(secs)).unwrap();
        }

        let removed = manager.prune(&hosts).unwrap();

        assert_eq!(removed.len(), 2);
        let remaining: Vec<_> = manager.list(&hosts).unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(
            remaining,
            vec!["hosts.backup.20241005143002", "hosts.backup.20241005143003"]
        );
    }

    #[test]
    fn test_prune_without_limit_keeps_everything() {
        let (_temp, hosts, manager) = setup();
        for secs in 0..3 {
            manager.snapshot_at(&hosts, at(secs)).unwrap();
        }

        assert!(manager.prune(&hosts).unwrap().is_empty());
        assert_eq!(manager.list(&hosts).unwrap().len(), 3);
    }
}
