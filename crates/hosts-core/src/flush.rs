//! Name-resolution cache flushing

use std::process::Command;

use crate::{Error, Result};

/// Flushes the operating system's name-resolution cache
pub trait CacheFlusher {
    fn flush(&self) -> Result<()>;

    /// Whether flushing is configured at all.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Runs a configured command such as `ipconfig /flushdns`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFlusher {
    command: Vec<String>,
}

impl CommandFlusher {
    /// Create a flusher for `command` (program followed by arguments).
    /// An empty command disables flushing.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn display(&self) -> String {
        self.command.join(" ")
    }
}

impl CacheFlusher for CommandFlusher {
    fn flush(&self) -> Result<()> {
        let Some((program, args)) = self.command.split_first() else {
            return Ok(());
        };

        tracing::debug!(command = %self.display(), "Flushing name-resolution cache");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::Flush {
                command: self.display(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            Err(Error::Flush {
                command: self.display(),
                message: if stderr.is_empty() {
                    format!("exit code {}", code)
                } else {
                    format!("exit code {}: {}", code, stderr)
                },
            })
        }
    }

    fn is_enabled(&self) -> bool {
        !self.command.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flusher(parts: &[&str]) -> CommandFlusher {
        CommandFlusher::new(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn empty_command_is_disabled() {
        let flusher = CommandFlusher::default();
        assert!(!flusher.is_enabled());
        assert!(flusher.flush().is_ok());
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = flusher(&["hosts-blocker-no-such-program"]).flush().unwrap_err();
        assert!(matches!(err, Error::Flush { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn successful_command() {
        assert!(flusher(&["true"]).flush().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_exit_code() {
        let err = flusher(&["sh", "-c", "echo nope >&2; exit 3"]).flush().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exit code 3"), "{message}");
        assert!(message.contains("nope"), "{message}");
    }
}
