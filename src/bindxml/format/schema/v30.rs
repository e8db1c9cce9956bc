//! Extraction rules for statistics schema 3.0.
//!
//! 3.0 drops the `isc/bind` wrapper, moves counter names into `name`
//! attributes, and groups counters under `<counters type="...">`. Memory and
//! zone layout have not changed since, so later versions reuse these rules.

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::bindxml::format::tree::RawDocument;
use crate::bindxml::types::error::{BindXmlError, Result, Section};
use crate::bindxml::types::models::{
    MemoryStats, QueryStats, Serial, SerialKind, ZoneCounter, ZoneCounters, ZoneData, ZoneStats,
};
use super::common::{attr, memory_summary, named_counters, require};

/// Counter groups under `server` that make up the query namespace.
const QUERY_GROUPS: &[&str] = &["qtype", "opcode"];

pub fn memory_stats(doc: &RawDocument) -> Result<MemoryStats> {
    let summary = require(doc.find_path(&["memory", "summary"]), Section::Memory, "memory/summary")?;
    memory_summary(summary)
}

/// Merges the `qtype` and `opcode` groups found directly under `server`.
pub fn query_stats(doc: &RawDocument) -> Result<QueryStats> {
    let server = require(doc.find("server"), Section::Query, "server")?;
    let mut stats = QueryStats::new();

    for group_type in QUERY_GROUPS {
        let group = server
            .children_named("counters")
            .find(|group| group.attr("type") == Some(*group_type))
            .ok_or_else(|| {
                BindXmlError::malformed(
                    Section::Query,
                    format!("no <counters type=\"{}\"> under server", group_type),
                )
            })?;
        let counters = named_counters(group, Section::Query)?;
        debug!("Read {} {} counters", counters.len(), group_type);
        stats.extend(counters);
    }

    Ok(stats)
}

/// `zone -> view -> data` for every `IN` zone of every view.
pub fn zone_stats(doc: &RawDocument, serial_kind: SerialKind) -> Result<ZoneStats> {
    let views = require(doc.find("views"), Section::Zone, "views")?;
    let mut zones: BTreeMap<String, BTreeMap<String, ZoneData>> = BTreeMap::new();

    for view in views.children_named("view") {
        let view_name = attr(view, "name", Section::Zone)?;

        for zone in view.find_all("zone") {
            match zone.attr("rdataclass") {
                Some("IN") => {}
                Some(class) => {
                    trace!(
                        "Skipping {} zone {} in view {}",
                        class,
                        zone.attr("name").unwrap_or("<unnamed>"),
                        view_name
                    );
                    continue;
                }
                None => {
                    warn!(
                        "Zone {} in view {} has no rdataclass; skipping",
                        zone.attr("name").unwrap_or("<unnamed>"),
                        view_name
                    );
                    continue;
                }
            }
            let zone_name = attr(zone, "name", Section::Zone)?;

            let serial = require(zone.child("serial"), Section::Zone, "zone/serial")?;
            let mut counters = ZoneCounters::new();
            for group in zone.children_named("counters") {
                let group_type = attr(group, "type", Section::Zone)?;
                for (name, value) in named_counters(group, Section::Zone)? {
                    counters.insert(
                        name,
                        ZoneCounter {
                            group: Some(group_type.to_string()),
                            value,
                        },
                    );
                }
            }

            let data = ZoneData {
                serial: Serial::from_text(serial.text(), serial_kind),
                counters,
            };
            let previous = zones
                .entry(zone_name.to_string())
                .or_default()
                .insert(view_name.to_string(), data);
            if previous.is_some() {
                warn!("Zone {} appears twice in view {}; keeping the later one", zone_name, view_name);
            }
        }
    }

    debug!("Read {} IN zones", zones.len());
    Ok(ZoneStats::Nested(zones))
}
