//! Custom error types for the bindxml-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every variant is a distinct failure kind so callers can tell
/// "BIND unreachable" (`Retrieval`) apart from "BIND reachable but the
/// document is unusable" (everything else).
#[derive(Debug, Error)]
pub enum BindXmlError {
    /// The raw document could not be obtained from its source.
    #[error("Unable to retrieve BIND statistics from {target}: {cause}")]
    Retrieval {
        target: String,
        #[source]
        cause: FetchError,
    },

    /// The bytes are not well-formed XML, or no `statistics` element exists.
    #[error("Malformed statistics document: {0}")]
    MalformedDocument(String),

    /// The `statistics` element carries no `version` attribute.
    #[error("Unable to determine XML version via 'statistics' element")]
    MissingVersion,

    /// The declared schema version has no extractor.
    #[error("Support must be added before being able to read statistics XML version {0}")]
    UnsupportedVersion(String),

    /// The version is known but a section does not have the shape its rules expect.
    #[error("Malformed {section} statistics: {reason}")]
    MalformedStatistics {
        section: Section,
        reason: String,
    },
}

impl BindXmlError {
    pub(crate) fn malformed(section: Section, reason: impl Into<String>) -> Self {
        BindXmlError::MalformedStatistics {
            section,
            reason: reason.into(),
        }
    }

    /// Returns `true` when the document never reached the parser.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, BindXmlError::Retrieval { .. })
    }
}

/// The underlying cause of a [`BindXmlError::Retrieval`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("HTTP status {0}")]
    Status(u16),
}

/// The statistics section an extraction failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Memory,
    Query,
    Zone,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Section::Memory => write!(f, "memory"),
            Section::Query => write!(f, "query"),
            Section::Zone => write!(f, "zone"),
        }
    }
}

/// A convenience `Result` type alias using the crate's `BindXmlError` type.
pub type Result<T> = std::result::Result<T, BindXmlError>;
