use log::info;

use super::format::schema::Extractor;
use super::format::tree::RawDocument;
use super::format::version;
use super::source::{DefaultSource, DocumentSource, Source};
use super::types::error::{BindXmlError, Result};
use super::types::models::StatisticsSnapshot;

/// The entry point for reading BIND statistics.
///
/// Each [`load`](Self::load) is self-contained: fetch, parse, detect the
/// schema version, run the matching extractor, and return a snapshot.
/// Nothing is cached or retried between calls, so one reader can be shared
/// freely or one created per target.
#[derive(Debug, Clone, Default)]
pub struct BindXmlReader<S: DocumentSource = DefaultSource> {
    fetcher: S,
}

impl BindXmlReader<DefaultSource> {
    /// A reader using the filesystem and plain HTTP.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DocumentSource> BindXmlReader<S> {
    /// A reader that obtains documents through `fetcher`.
    pub fn with_source(fetcher: S) -> Self {
        Self { fetcher }
    }

    /// Read statistics from a file or a statistics channel.
    ///
    /// # Errors
    /// - [`BindXmlError::Retrieval`] if the document could not be fetched
    /// - [`BindXmlError::MalformedDocument`] if it is not XML or has no `statistics` element
    /// - [`BindXmlError::MissingVersion`] if `statistics` declares no version
    /// - [`BindXmlError::UnsupportedVersion`] if the version has no extractor
    /// - [`BindXmlError::MalformedStatistics`] if a section does not match its version's layout
    pub fn load(&self, source: &Source) -> Result<StatisticsSnapshot> {
        info!("Loading BIND statistics from {}", source);
        let bytes = self
            .fetcher
            .fetch(source)
            .map_err(|cause| BindXmlError::Retrieval {
                target: source.to_string(),
                cause,
            })?;
        parse(&bytes)
    }
}

/// Parse a statistics document that is already in memory.
pub fn parse(bytes: &[u8]) -> Result<StatisticsSnapshot> {
    let doc = RawDocument::parse(bytes)?;
    let version = version::detect(&doc)?;
    let extractor = Extractor::for_version(version);

    let memory = extractor.memory_stats(&doc)?;
    let queries = extractor.query_stats(&doc)?;
    let zones = extractor.zone_stats(&doc)?;

    info!(
        "Statistics read: version={}, memory counters={}, query counters={}, zones={}",
        version,
        memory.len(),
        queries.len(),
        zones.zone_count()
    );

    Ok(StatisticsSnapshot::new(version, memory, queries, zones))
}
