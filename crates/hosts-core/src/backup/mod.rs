//! Pre-update snapshots of the hosts file
//!
//! Before the hosts file is rewritten, a copy is stored next to the other
//! snapshots as `<file name>.backup.<YYYYMMDDHHMMSS>` (for example
//! `hosts.backup.20241005143012`). Snapshots are never read back by the
//! tool; they exist for manual recovery. Retention is unlimited unless
//! `backup.keep` is configured.

mod snapshot;

pub use snapshot::{BackupId, BackupManager};
