//! Traversal helpers shared by every schema version.

use log::trace;

use crate::bindxml::format::tree::Element;
use crate::bindxml::types::error::{BindXmlError, Result, Section};
use crate::bindxml::types::models::MemoryStats;
use crate::bindxml::utils;

/// Turns an absent node into a `MalformedStatistics` error naming what was expected.
pub fn require<'a>(node: Option<&'a Element>, section: Section, what: &str) -> Result<&'a Element> {
    node.ok_or_else(|| BindXmlError::malformed(section, format!("no '{}' element", what)))
}

/// Reads an element's text as a counter value.
pub fn count(element: &Element, section: Section) -> Result<u64> {
    utils::parse_count(element.text()).ok_or_else(|| {
        BindXmlError::malformed(
            section,
            format!(
                "<{}> holds '{}', expected a non-negative integer",
                element.name(),
                element.text()
            ),
        )
    })
}

/// Reads a required attribute.
pub fn attr<'a>(element: &'a Element, key: &str, section: Section) -> Result<&'a str> {
    element.attr(key).ok_or_else(|| {
        BindXmlError::malformed(
            section,
            format!("<{}> has no '{}' attribute", element.name(), key),
        )
    })
}

/// Reads a memory `summary` block: each child element name is the key,
/// its text the byte count. Layout is the same in every version.
pub fn memory_summary(summary: &Element) -> Result<MemoryStats> {
    summary
        .children()
        .map(|stat| {
            let value = count(stat, Section::Memory)?;
            trace!("memory {} = {}", stat.name(), value);
            Ok((stat.name().to_string(), value))
        })
        .collect()
}

/// Reads `<counter name="...">N</counter>` children of a 3.x counter group.
pub fn named_counters(group: &Element, section: Section) -> Result<Vec<(String, u64)>> {
    group
        .find_all("counter")
        .into_iter()
        .map(|counter| {
            let name = attr(counter, "name", section)?;
            Ok((name.to_string(), count(counter, section)?))
        })
        .collect()
}
