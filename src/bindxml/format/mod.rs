//! Document parsing layer for BIND statistics XML.
//!
//! This module sits between the raw bytes handed over by a
//! [`DocumentSource`](crate::bindxml::source::DocumentSource) and the
//! high-level [`BindXmlReader`](crate::bindxml::reader::BindXmlReader).
//!
//! # Module Organization
//!
//! - [`tree`]: Builds the immutable element tree from XML bytes
//! - [`version`]: Reads the declared schema version
//! - [`schema`]: Per-version extraction of memory, query and zone statistics
//!
//! ```text
//! bytes ──► tree::RawDocument::parse()
//!                 │
//!                 ├──► version::detect() ──► SchemaVersion
//!                 │                               │
//!                 └──► schema::Extractor::for_version(..)
//!                          ├─ memory_stats()
//!                          ├─ query_stats()
//!                          └─ zone_stats()
//! ```

pub mod schema;
pub mod tree;
pub mod version;
