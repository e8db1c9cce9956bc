//! # bindxml-reader
//!
//! A reader for the statistics XML document served by ISC BIND's statistics
//! channel. Schema versions 2.2, 3.0, 3.3, 3.5, 3.6, 3.8 and 3.11 are read
//! into one normalized [`StatisticsSnapshot`]: memory counters, query-type
//! and opcode counters, and per-zone serials and counters.
//!
//! ```no_run
//! use bindxml_reader::{BindXmlReader, Source};
//!
//! let snapshot = BindXmlReader::new().load(&Source::host("127.0.0.1"))?;
//! println!("{} zones", snapshot.zones().zone_count());
//! # Ok::<(), bindxml_reader::BindXmlError>(())
//! ```
pub mod bindxml;

// Re-export the main types for convenience
pub use bindxml::{
    BindXmlError, BindXmlReader, DefaultSource, DocumentSource, FetchError, Result, Section,
    Source, DEFAULT_PORT, parse,
    models::{
        MemoryStats,
        QueryStats,
        SchemaVersion,
        SerialKind,
        Serial,
        StatisticsSnapshot,
        ZoneCounter,
        ZoneData,
        ZoneRecord,
        ZoneStats,
    },
};
