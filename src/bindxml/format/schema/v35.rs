//! Extraction rules for statistics schema 3.5 and later.
//!
//! Only the query section changed: every counter group under `server` is
//! folded into the query namespace and the group type is no longer used.

use log::debug;

use crate::bindxml::format::tree::RawDocument;
use crate::bindxml::types::error::{Result, Section};
use crate::bindxml::types::models::QueryStats;
use super::common::{named_counters, require};

pub fn query_stats(doc: &RawDocument) -> Result<QueryStats> {
    let server = require(doc.find("server"), Section::Query, "server")?;
    let mut stats = QueryStats::new();

    let groups = server.find_all("counters");
    debug!("Flattening {} counter groups under server", groups.len());
    for group in groups {
        stats.extend(named_counters(group, Section::Query)?);
    }

    Ok(stats)
}
