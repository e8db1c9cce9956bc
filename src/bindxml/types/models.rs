//! Core data structures for the normalized statistics model.
//!
//! This module defines the version-independent result of a parse:
//! - The detected schema version
//! - Memory and query counter maps
//! - Zone statistics in either of the two shapes BIND has used
//! - The immutable snapshot bundling all of the above

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::error::{BindXmlError, Result};

/// Memory allocator counters, keyed by lowercase counter name (`totaluse`, `inuse`, ...).
pub type MemoryStats = BTreeMap<String, u64>;

/// Query-type and opcode counters merged into one flat namespace (`A`, `AAAA`, `QUERY`, ...).
pub type QueryStats = BTreeMap<String, u64>;

/// Per-zone counters keyed by counter name.
pub type ZoneCounters = BTreeMap<String, ZoneCounter>;

/// A statistics schema version published by BIND.
///
/// The version decides which traversal rules the extractor applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaVersion {
    V2_2,
    V3_0,
    V3_3,
    V3_5,
    V3_6,
    V3_8,
    V3_11,
}

impl SchemaVersion {
    /// Every version this crate can read, oldest first.
    pub const SUPPORTED: &'static [SchemaVersion] = &[
        SchemaVersion::V2_2,
        SchemaVersion::V3_0,
        SchemaVersion::V3_3,
        SchemaVersion::V3_5,
        SchemaVersion::V3_6,
        SchemaVersion::V3_8,
        SchemaVersion::V3_11,
    ];

    /// The version string exactly as BIND declares it.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V2_2 => "2.2",
            SchemaVersion::V3_0 => "3.0",
            SchemaVersion::V3_3 => "3.3",
            SchemaVersion::V3_5 => "3.5",
            SchemaVersion::V3_6 => "3.6",
            SchemaVersion::V3_8 => "3.8",
            SchemaVersion::V3_11 => "3.11",
        }
    }

    /// How zone serials are represented natively in this version.
    pub fn serial_kind(&self) -> SerialKind {
        match self {
            SchemaVersion::V3_0 | SchemaVersion::V3_3 => SerialKind::Numeric,
            SchemaVersion::V2_2
            | SchemaVersion::V3_5
            | SchemaVersion::V3_6
            | SchemaVersion::V3_8
            | SchemaVersion::V3_11 => SerialKind::Textual,
        }
    }
}

impl TryFrom<&str> for SchemaVersion {
    type Error = BindXmlError;
    fn try_from(value: &str) -> Result<Self> {
        SchemaVersion::SUPPORTED
            .iter()
            .copied()
            .find(|v| v.as_str() == value.trim())
            .ok_or_else(|| BindXmlError::UnsupportedVersion(value.to_string()))
    }
}

impl FromStr for SchemaVersion {
    type Err = BindXmlError;
    fn from_str(s: &str) -> Result<Self> {
        SchemaVersion::try_from(s)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialKind {
    Numeric,
    Textual,
}

/// A zone serial as the schema version reports it.
///
/// Some versions yield a number and others a string for the same field;
/// the distinction is kept per record rather than coerced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Serial {
    Number(u64),
    Text(String),
}

impl Serial {
    /// Builds a serial from element text following the version's representation.
    ///
    /// A numeric version that meets non-decimal text (BIND prints `-` for
    /// zones that are not loaded) keeps the text as-is.
    pub fn from_text(text: &str, kind: SerialKind) -> Self {
        let text = text.trim();
        match kind {
            SerialKind::Numeric => text
                .parse::<u64>()
                .map(Serial::Number)
                .unwrap_or_else(|_| Serial::Text(text.to_string())),
            SerialKind::Textual => Serial::Text(text.to_string()),
        }
    }

    /// The serial as an integer, whichever way it was reported.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Serial::Number(n) => Some(*n),
            Serial::Text(s) => s.parse().ok(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Serial::Text(_))
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Serial::Number(n) => write!(f, "{}", n),
            Serial::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// One named zone counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCounter {
    /// The enclosing counter group's `type` (`rcode`, `qtype`, ...).
    /// `None` where the schema has no groups.
    pub group: Option<String>,
    pub value: u64,
}

/// Serial and counters of one zone as seen from one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneData {
    pub serial: Serial,
    pub counters: ZoneCounters,
}

impl ZoneData {
    pub fn counter(&self, name: &str) -> Option<u64> {
        self.counters.get(name).map(|c| c.value)
    }
}

/// One entry of the list-of-records zone layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub view: String,
    pub zone: String,
    pub class: String,
    pub data: ZoneData,
}

/// Zone statistics in the shape the schema version produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneStats {
    /// Independent records; a zone served by several views repeats.
    Records(Vec<ZoneRecord>),
    /// `zone name -> view name -> data`.
    Nested(BTreeMap<String, BTreeMap<String, ZoneData>>),
}

impl ZoneStats {
    /// Number of distinct zone names.
    pub fn zone_count(&self) -> usize {
        match self {
            ZoneStats::Records(_) => self.zone_names().len(),
            ZoneStats::Nested(map) => map.len(),
        }
    }

    pub fn zone_names(&self) -> BTreeSet<&str> {
        match self {
            ZoneStats::Records(records) => records.iter().map(|r| r.zone.as_str()).collect(),
            ZoneStats::Nested(map) => map.keys().map(String::as_str).collect(),
        }
    }

    /// Views in which `zone` appears.
    pub fn views(&self, zone: &str) -> BTreeSet<&str> {
        match self {
            ZoneStats::Records(records) => records
                .iter()
                .filter(|r| r.zone == zone)
                .map(|r| r.view.as_str())
                .collect(),
            ZoneStats::Nested(map) => map
                .get(zone)
                .map(|views| views.keys().map(String::as_str).collect())
                .unwrap_or_default(),
        }
    }

    pub fn get(&self, zone: &str, view: &str) -> Option<&ZoneData> {
        match self {
            ZoneStats::Records(records) => records
                .iter()
                .find(|r| r.zone == zone && r.view == view)
                .map(|r| &r.data),
            ZoneStats::Nested(map) => map.get(zone).and_then(|views| views.get(view)),
        }
    }

    /// Iterates `(zone, view, data)` in storage order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &str, &ZoneData)> + '_> {
        match self {
            ZoneStats::Records(records) => Box::new(
                records
                    .iter()
                    .map(|r| (r.zone.as_str(), r.view.as_str(), &r.data)),
            ),
            ZoneStats::Nested(map) => Box::new(map.iter().flat_map(|(zone, views)| {
                views
                    .iter()
                    .map(move |(view, data)| (zone.as_str(), view.as_str(), data))
            })),
        }
    }
}

/// Everything one load produced.
///
/// Built once at the end of a load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    version: SchemaVersion,
    memory: MemoryStats,
    queries: QueryStats,
    zones: ZoneStats,
}

impl StatisticsSnapshot {
    pub(crate) fn new(
        version: SchemaVersion,
        memory: MemoryStats,
        queries: QueryStats,
        zones: ZoneStats,
    ) -> Self {
        Self {
            version,
            memory,
            queries,
            zones,
        }
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn memory(&self) -> &MemoryStats {
        &self.memory
    }

    pub fn queries(&self) -> &QueryStats {
        &self.queries
    }

    pub fn zones(&self) -> &ZoneStats {
        &self.zones
    }
}
