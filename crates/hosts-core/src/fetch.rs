//! Block-list download
//!
//! [`HttpFetcher`] performs a single blocking GET with an explicit timeout.
//! There is no retry and no integrity check of the body; any failure is
//! returned to the caller so the hosts file is left untouched.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::FetchConfig;
use crate::{Error, Result};

/// Source of the payload installed inside the managed block
pub trait Fetcher {
    /// Download `url` and return the body as text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches block-lists over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a client honoring the configured timeout and user agent.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let timeout = config.timeout();
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch {
                url: String::new(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, url: &str, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::FetchTimeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Fetch {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url, timeout_secs = self.timeout.as_secs(), "Downloading block-list");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| self.map_error(url, e))?;
        tracing::info!(url, bytes = body.len(), "Downloaded block-list");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one HTTP response on a local port.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/hosts.txt", addr)
    }

    fn fetcher(timeout_secs: u64) -> HttpFetcher {
        HttpFetcher::new(&FetchConfig {
            timeout_secs,
            ..FetchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_fetch_returns_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 23\r\nConnection: close\r\n\r\n0.0.0.0 ads.example\r\n\r\n",
        );

        let body = fetcher(5).fetch(&url).unwrap();
        assert_eq!(body, "0.0.0.0 ads.example\r\n\r\n");
    }

    #[test]
    fn test_fetch_non_success_status() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");

        let err = fetcher(5).fetch(&url).unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    }

    #[test]
    fn test_fetch_connection_refused() {
        // Bind then drop to get a port with nothing listening
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let err = fetcher(5)
            .fetch(&format!("http://127.0.0.1:{}/hosts.txt", port))
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[test]
    fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            // Accept and hold the connection open without answering
            let conn = listener.accept();
            thread::sleep(Duration::from_secs(3));
            drop(conn);
        });

        let err = fetcher(1)
            .fetch(&format!("http://{}/hosts.txt", addr))
            .unwrap_err();
        assert!(matches!(err, Error::FetchTimeout { timeout_secs: 1, .. }));
        handle.join().unwrap();
    }

    #[test]
    fn test_invalid_url() {
        let err = fetcher(5).fetch("not a url").unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }
}
