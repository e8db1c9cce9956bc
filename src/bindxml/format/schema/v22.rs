//! Extraction rules for statistics schema 2.2 (BIND 9.6 to 9.9).
//!
//! 2.2 wraps everything in `isc/bind/statistics` and spells counters as
//! nested `<name>`/`<counter>` elements instead of attributes. Zones come out
//! as a list of independent records, one per (view, zone) pair.

use log::{debug, trace};

use crate::bindxml::format::tree::{Element, RawDocument};
use crate::bindxml::types::error::{BindXmlError, Result, Section};
use crate::bindxml::types::models::{
    MemoryStats, QueryStats, Serial, SerialKind, ZoneCounter, ZoneCounters, ZoneData, ZoneRecord,
    ZoneStats,
};
use super::common::{count, memory_summary, require};

pub fn memory_stats(doc: &RawDocument) -> Result<MemoryStats> {
    let summary = require(
        doc.find_path(&["bind", "statistics", "memory", "summary"]),
        Section::Memory,
        "bind/statistics/memory/summary",
    )?;
    memory_summary(summary)
}

/// Query types from `server/queries-in` plus every `opcode` under `server`.
pub fn query_stats(doc: &RawDocument) -> Result<QueryStats> {
    let server = require(doc.find("server"), Section::Query, "server")?;
    let queries_in = require(server.find("queries-in"), Section::Query, "server/queries-in")?;

    let opcodes = server.find_all("opcode");
    debug!(
        "Reading {} query types and {} opcodes",
        queries_in.children().len(),
        opcodes.len()
    );

    queries_in
        .children()
        .chain(opcodes)
        .map(name_and_counter)
        .collect()
}

fn name_and_counter(stat: &Element) -> Result<(String, u64)> {
    let name = require(stat.child("name"), Section::Query, "name")?.text();
    if name.is_empty() {
        return Err(BindXmlError::malformed(
            Section::Query,
            format!("<{}> has an empty <name>", stat.name()),
        ));
    }
    let value = count(require(stat.child("counter"), Section::Query, "counter")?, Section::Query)?;
    Ok((name.to_string(), value))
}

/// One record per `IN` zone per view. Zone names are written `name/class`.
pub fn zone_stats(doc: &RawDocument, serial_kind: SerialKind) -> Result<ZoneStats> {
    let views = require(doc.find("views"), Section::Zone, "views")?;
    let mut records = Vec::new();

    for view in views.find_all("view") {
        let view_name = require(view.child("name"), Section::Zone, "view/name")?.text();

        for zone in view.find_all("zone") {
            let qualified = require(zone.child("name"), Section::Zone, "zone/name")?.text();
            let (zone_name, class) = qualified.rsplit_once('/').ok_or_else(|| {
                BindXmlError::malformed(
                    Section::Zone,
                    format!("zone name '{}' has no '/class' suffix", qualified),
                )
            })?;
            if class != "IN" {
                trace!("Skipping {} zone {} in view {}", class, zone_name, view_name);
                continue;
            }

            let serial = require(zone.child("serial"), Section::Zone, "zone/serial")?;
            let counters = match zone.child("counters") {
                Some(container) => element_counters(container)?,
                None => ZoneCounters::new(),
            };

            records.push(ZoneRecord {
                view: view_name.to_string(),
                zone: zone_name.to_string(),
                class: class.to_string(),
                data: ZoneData {
                    serial: Serial::from_text(serial.text(), serial_kind),
                    counters,
                },
            });
        }
    }

    debug!("Read {} zone records", records.len());
    Ok(ZoneStats::Records(records))
}

/// Each direct child of `counters` is one counter: tag name is the key.
fn element_counters(container: &Element) -> Result<ZoneCounters> {
    container
        .children()
        .map(|counter| {
            let value = count(counter, Section::Zone)?;
            Ok((counter.name().to_string(), ZoneCounter { group: None, value }))
        })
        .collect()
}
