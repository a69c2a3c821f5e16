//! Administrator/root detection

use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Whether the current process runs with elevated rights.
///
/// On Unix this is an effective user id of 0 (`id -u`). On Windows,
/// `net session` only succeeds from an elevated prompt.
pub fn is_elevated() -> bool {
    if cfg!(windows) {
        Command::new("net")
            .arg("session")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    } else {
        Command::new("id")
            .arg("-u")
            .stderr(Stdio::null())
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim() == "0")
            .unwrap_or(false)
    }
}

/// Fail with [`Error::NotElevated`] when elevation is required but missing.
pub fn ensure_elevated(required: bool) -> Result<()> {
    if !required {
        tracing::debug!("Elevation check disabled by configuration");
        return Ok(());
    }
    if is_elevated() {
        Ok(())
    } else {
        Err(Error::NotElevated)
    }
}
