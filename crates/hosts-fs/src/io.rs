//! Atomic I/O operations with file locking

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Distinguishes temp files of concurrent writers within one process.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so a reader of the hosts file only ever
/// sees the old or the new content. An advisory lock is held on the temp
/// file while it is written.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory as the target, so the rename never crosses filesystems
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        path.file_name().unwrap_or("hosts"),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let temp_path = path.with_file_name(&temp_name).to_native();

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy `source` to `dest`, refusing to overwrite an existing `dest`.
///
/// Returns the number of bytes copied. The destination's parent directory
/// is created when missing.
pub fn copy_exclusive(source: &NormalizedPath, dest: &NormalizedPath) -> Result<u64> {
    let source_native = source.to_native();
    let dest_native = dest.to_native();

    if let Some(parent) = dest_native.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut reader = fs::File::open(&source_native).map_err(|e| Error::io(&source_native, e))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&dest_native)
        .map_err(|e| Error::io(&dest_native, e))?;

    let copied = io::copy(&mut reader, &mut writer)
        .and_then(|n| writer.sync_all().map(|()| n))
        .map_err(|e| Error::io(&dest_native, e))?;

    Ok(copied)
}
