//! HostsUpdater implementation
//!
//! The updater coordinates the collaborators for the two operations the
//! tool offers: installing the latest block-list and removing it again.
//!
//! Add/update: backup → download → merge → write → flush.
//! Remove: merge → backup → write → flush (skipped entirely when there is
//! nothing to remove).
//!
//! Failures before the write abort the operation with the hosts file
//! untouched. Old snapshots are pruned only after a successful write, so
//! failed or no-op runs never push out earlier snapshots. A failed cache flush after a successful write is reported in
//! the [`UpdateReport`] instead.

use hosts_blocks::{BlockMerger, count_entries, find_blocks};
use hosts_fs::{NormalizedPath, checksum, io};

use crate::backup::{BackupId, BackupManager};
use crate::config::BlockerConfig;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::flush::{CacheFlusher, CommandFlusher};
use crate::Result;

/// What happened to the name-resolution cache after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    Flushed,
    /// Nothing was written, or no flush command is configured
    Skipped,
    /// The flush command failed; the hosts file was still updated
    Failed(String),
}

/// Result of an add/update or remove operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// Snapshot taken before the write, if one was needed
    pub backup: Option<BackupId>,
    /// Whether the hosts file content changed
    pub changed: bool,
    /// Host entries installed (add/update) or removed (remove)
    pub entries: usize,
    pub flush: FlushOutcome,
}

/// Current state of the hosts file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsStatus {
    pub installed: bool,
    /// Host entries inside the managed block
    pub entries: usize,
    pub backups: usize,
}

/// Applies and removes the managed block on one hosts file
pub struct HostsUpdater<F, C> {
    hosts_path: NormalizedPath,
    source_url: String,
    merger: BlockMerger,
    backups: BackupManager,
    fetcher: F,
    flusher: C,
}

impl HostsUpdater<HttpFetcher, CommandFlusher> {
    /// Build an updater with the HTTP fetcher and command flusher described
    /// by `config`.
    pub fn from_config(config: &BlockerConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let flusher = CommandFlusher::new(config.flush_command.clone());
        Self::new(config, fetcher, flusher)
    }
}

impl<F: Fetcher, C: CacheFlusher> HostsUpdater<F, C> {
    /// Build an updater from `config` with the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: &BlockerConfig, fetcher: F, flusher: C) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            hosts_path: config.hosts_path(),
            source_url: config.source_url.clone(),
            merger: BlockMerger::new(config.markers.to_markers()?),
            backups: BackupManager::new(config.backup_dir(), config.backup.keep),
            fetcher,
            flusher,
        })
    }

    pub fn hosts_path(&self) -> &NormalizedPath {
        &self.hosts_path
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Install the latest block-list, replacing any previous managed block.
    ///
    /// # Errors
    ///
    /// Fails without touching the hosts file when the backup, the download,
    /// or reading the hosts file fails. Fails after the backup when the
    /// write itself fails.
    pub fn add_or_update(&self) -> Result<UpdateReport> {
        let backup = self.backups.snapshot(&self.hosts_path)?;

        let payload = self.fetcher.fetch(&self.source_url)?;
        tracing::info!(
            checksum = %checksum::compute_content_checksum(&payload),
            "Fetched payload"
        );

        let current = io::read_text(&self.hosts_path)?;
        let merged = self.merger.merge(&current, Some(&payload));
        let entries = count_entries(&payload);

        if current == merged {
            tracing::info!(path = %self.hosts_path, "Hosts file already up to date");
            return Ok(UpdateReport {
                backup: Some(backup),
                changed: false,
                entries,
                flush: FlushOutcome::Skipped,
            });
        }

        io::write_text(&self.hosts_path, &merged)?;
        tracing::info!(path = %self.hosts_path, entries, "Hosts file updated");
        self.prune_backups();

        Ok(UpdateReport {
            backup: Some(backup),
            changed: true,
            entries,
            flush: self.flush(),
        })
    }

    /// Remove the managed block.
    ///
    /// When the hosts file holds no managed block nothing is backed up,
    /// written or flushed.
    pub fn remove(&self) -> Result<UpdateReport> {
        let current = io::read_text(&self.hosts_path)?;
        let merged = self.merger.remove(&current);

        if current == merged {
            tracing::info!(path = %self.hosts_path, "No managed block to remove");
            return Ok(UpdateReport {
                backup: None,
                changed: false,
                entries: 0,
                flush: FlushOutcome::Skipped,
            });
        }

        let entries = find_blocks(&current, self.merger.markers())
            .iter()
            .map(|block| block.entry_count())
            .sum();

        let backup = self.backups.snapshot(&self.hosts_path)?;

        io::write_text(&self.hosts_path, &merged)?;
        tracing::info!(path = %self.hosts_path, entries, "Managed block removed");
        self.prune_backups();

        Ok(UpdateReport {
            backup: Some(backup),
            changed: true,
            entries,
            flush: self.flush(),
        })
    }

    /// Inspect the hosts file and backup directory without changing them.
    pub fn status(&self) -> Result<HostsStatus> {
        let current = io::read_text(&self.hosts_path)?;
        let blocks = find_blocks(&current, self.merger.markers());

        Ok(HostsStatus {
            installed: !blocks.is_empty(),
            entries: blocks.iter().map(|block| block.entry_count()).sum(),
            backups: self.backups.list(&self.hosts_path)?.len(),
        })
    }

    fn prune_backups(&self) {
        if let Err(e) = self.backups.prune(&self.hosts_path) {
            tracing::warn!(error = %e, "Failed to prune old backups");
        }
    }

    fn flush(&self) -> FlushOutcome {
        if !self.flusher.is_enabled() {
            return FlushOutcome::Skipped;
        }

        match self.flusher.flush() {
            Ok(()) => {
                tracing::info!("Name-resolution cache flushed");
                FlushOutcome::Flushed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cache flush failed");
                FlushOutcome::Failed(e.to_string())
            }
        }
    }
}
