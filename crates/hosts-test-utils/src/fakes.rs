//! In-memory collaborators for exercising `HostsUpdater` without network
//! access or OS commands.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hosts_core::{CacheFlusher, Error, Fetcher, Result};

/// Returns a fixed body for every URL and records the URLs requested.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    body: String,
    requests: Rc<RefCell<Vec<String>>>,
}

impl StaticFetcher {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            requests: Rc::default(),
        }
    }

    /// URLs fetched so far, shared across clones.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Fails every download.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFetcher {
    timeout: bool,
}

impl FailingFetcher {
    /// Fail like a refused connection.
    pub fn refused() -> Self {
        Self { timeout: false }
    }

    /// Fail like a request exceeding its timeout.
    pub fn timed_out() -> Self {
        Self { timeout: true }
    }
}

impl Fetcher for FailingFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        if self.timeout {
            Err(Error::FetchTimeout {
                url: url.to_string(),
                timeout_secs: 30,
            })
        } else {
            Err(Error::Fetch {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }
}

/// Counts flushes; optionally fails each one.
#[derive(Debug, Clone, Default)]
pub struct RecordingFlusher {
    calls: Rc<Cell<usize>>,
    fail: bool,
}

impl RecordingFlusher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of flushes attempted, shared across clones.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl CacheFlusher for RecordingFlusher {
    fn flush(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(Error::Flush {
                command: "flush-test".to_string(),
                message: "exit code 1".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
