//! Schema version detection.
//!
//! BIND declares the schema on its `statistics` element: the document root
//! for 3.x, `isc/bind/statistics` for 2.2.

use log::debug;

use crate::bindxml::types::error::{BindXmlError, Result};
use crate::bindxml::types::models::SchemaVersion;
use super::tree::RawDocument;

/// Reads the declared version string from the first `statistics` element.
pub fn declared(doc: &RawDocument) -> Result<&str> {
    let statistics = doc.find("statistics").ok_or_else(|| {
        BindXmlError::MalformedDocument("No 'statistics' element found".to_string())
    })?;
    statistics
        .attr("version")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(BindXmlError::MissingVersion)
}

/// Detects the schema version and maps it onto a supported variant.
pub fn detect(doc: &RawDocument) -> Result<SchemaVersion> {
    let declared = declared(doc)?;
    let version = SchemaVersion::try_from(declared)?;
    debug!("Statistics XML declares version {} (read as {:?})", declared, version);
    Ok(version)
}
