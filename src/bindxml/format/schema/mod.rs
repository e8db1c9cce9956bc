//! # Schema Extraction Dispatcher
//!
//! One extractor per detected [`SchemaVersion`], each exposing the same three
//! operations. A version that reads a section the same way as an earlier one
//! calls that version's function directly:
//!
//! | Version        | memory | query | zone  |
//! |----------------|--------|-------|-------|
//! | 2.2            | v22    | v22   | v22   |
//! | 3.0, 3.3       | v30    | v30   | v30   |
//! | 3.5 and later  | v30    | v35   | v30   |

use log::debug;

use crate::bindxml::types::error::Result;
use crate::bindxml::types::models::{MemoryStats, QueryStats, SchemaVersion, ZoneStats};
use super::tree::RawDocument;

pub mod common;
pub mod v22;
pub mod v30;
pub mod v35;

/// Version-specific extraction rules, selected once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    version: SchemaVersion,
}

impl Extractor {
    pub fn for_version(version: SchemaVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn memory_stats(&self, doc: &RawDocument) -> Result<MemoryStats> {
        let stats = match self.version {
            SchemaVersion::V2_2 => v22::memory_stats(doc),
            SchemaVersion::V3_0
            | SchemaVersion::V3_3
            | SchemaVersion::V3_5
            | SchemaVersion::V3_6
            | SchemaVersion::V3_8
            | SchemaVersion::V3_11 => v30::memory_stats(doc),
        }?;
        debug!("Extracted {} memory counters", stats.len());
        Ok(stats)
    }

    pub fn query_stats(&self, doc: &RawDocument) -> Result<QueryStats> {
        let stats = match self.version {
            SchemaVersion::V2_2 => v22::query_stats(doc),
            SchemaVersion::V3_0 | SchemaVersion::V3_3 => v30::query_stats(doc),
            SchemaVersion::V3_5
            | SchemaVersion::V3_6
            | SchemaVersion::V3_8
            | SchemaVersion::V3_11 => v35::query_stats(doc),
        }?;
        debug!("Extracted {} query counters", stats.len());
        Ok(stats)
    }

    pub fn zone_stats(&self, doc: &RawDocument) -> Result<ZoneStats> {
        let serial_kind = self.version.serial_kind();
        let stats = match self.version {
            SchemaVersion::V2_2 => v22::zone_stats(doc, serial_kind),
            SchemaVersion::V3_0
            | SchemaVersion::V3_3
            | SchemaVersion::V3_5
            | SchemaVersion::V3_6
            | SchemaVersion::V3_8
            | SchemaVersion::V3_11 => v30::zone_stats(doc, serial_kind),
        }?;
        debug!("Extracted statistics for {} zones", stats.zone_count());
        Ok(stats)
    }
}
