//! Document retrieval.
//!
//! The reader never performs I/O itself. It asks a [`DocumentSource`] for the
//! raw bytes of a [`Source`], which lets tests substitute an in-memory source
//! and lets callers put their own deadline on network fetches.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};

use super::types::error::FetchError;

/// Port BIND's statistics channel listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8053;

/// Where a statistics document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    /// A document saved to disk.
    File(PathBuf),
    /// A live statistics channel, queried with `GET http://<host>:<port>/`.
    Http { host: String, port: u16 },
}

impl Source {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Source::File(path.as_ref().to_path_buf())
    }

    pub fn http(host: impl Into<String>, port: u16) -> Self {
        Source::Http {
            host: host.into(),
            port,
        }
    }

    /// A statistics channel on [`DEFAULT_PORT`].
    pub fn host(host: impl Into<String>) -> Self {
        Source::http(host, DEFAULT_PORT)
    }

    /// The URL fetched for an HTTP source.
    pub fn url(&self) -> Option<String> {
        match self {
            Source::File(_) => None,
            Source::Http { host, port } => Some(format!("http://{}:{}/", host, port)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Http { host, port } => write!(f, "{}:{}", host, port),
        }
    }
}

/// Supplies the raw bytes of one statistics document.
pub trait DocumentSource {
    /// Fetch the whole document in a single attempt.
    fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(source)
    }
}

/// Reads files from disk and queries statistics channels over plain HTTP.
#[derive(Debug, Clone, Default)]
pub struct DefaultSource {
    timeout: Option<Duration>,
}

impl DefaultSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds each HTTP request to `timeout`. File reads are not affected.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let response = client.get(url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.bytes()?.to_vec())
    }
}

impl DocumentSource for DefaultSource {
    fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError> {
        let bytes = match source {
            Source::File(path) => {
                info!("Reading BIND statistics from {}", path.display());
                fs::read(path)?
            }
            Source::Http { host, port } => {
                let url = format!("http://{}:{}/", host, port);
                info!("Querying BIND statistics channel at {}", url);
                self.fetch_http(&url)?
            }
        };
        debug!("Fetched {} bytes from {}", bytes.len(), source);
        Ok(bytes)
    }
}
