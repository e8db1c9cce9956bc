//! Immutable element tree built from the raw statistics XML.
//!
//! The extractors never touch XML events directly. They walk this tree
//! through explicit presence checks (`child`, `find`, `attr`) that return
//! `Option`, so a missing node is always a visible case rather than a panic.
//!
//! Element and attribute names are folded to ASCII lowercase while the tree
//! is built; attribute values and text are kept exactly as written.

use log::trace;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::bindxml::types::error::{BindXmlError, Result};
use crate::bindxml::utils;

/// Deepest element nesting accepted. BIND's documents stay under ten levels;
/// the tree walks recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// One XML element with its attributes, direct text and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// The lowercase tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an attribute by its lowercase name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct text and CDATA content, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant called `name`, in document order.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find(name)
            }
        })
    }

    /// Every descendant called `name`, in document order.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    /// Descends through `path`, taking the first matching descendant at each step.
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |current, name| current.find(name))
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_named(name, found);
        }
    }
}

/// A parsed statistics document. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    root: Element,
}

impl RawDocument {
    /// Decodes and parses raw document bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let xml = utils::decode_document(bytes);
        Self::parse_str(&xml)
    }

    /// Parses an already decoded document.
    pub fn parse_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if open.len() >= MAX_DEPTH {
                        return Err(BindXmlError::MalformedDocument(format!(
                            "Elements nested deeper than {} levels",
                            MAX_DEPTH
                        )));
                    }
                    open.push(open_element(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let element = open_element(&e)?;
                    close_element(element, &mut open, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let element = open.pop().ok_or_else(|| {
                        BindXmlError::MalformedDocument("Unexpected closing tag".to_string())
                    })?;
                    close_element(element, &mut open, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = open.last_mut() {
                        let text = e.unescape().map_err(|e| {
                            BindXmlError::MalformedDocument(format!("Failed to decode XML text: {}", e))
                        })?;
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(BindXmlError::MalformedDocument(format!(
                        "Failed to read XML at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = open.last() {
            return Err(BindXmlError::MalformedDocument(format!(
                "Element <{}> is never closed",
                unclosed.name
            )));
        }

        let root = root.ok_or_else(|| {
            BindXmlError::MalformedDocument("No root element found".to_string())
        })?;
        trace!("Parsed statistics XML with root <{}>", root.name);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// First element called `name`, the root included.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.root.name == name {
            Some(&self.root)
        } else {
            self.root.find(name)
        }
    }

    /// Like [`Element::find_path`], with the first step allowed to match the root.
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        let (first, rest) = path.split_first()?;
        self.find(first)?.find_path(rest)
    }
}

fn open_element(start: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let attributes = start
        .attributes()
        .map(|attr_result| {
            let attr = attr_result.map_err(|e| {
                BindXmlError::MalformedDocument(format!("Failed to parse XML attribute: {}", e))
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = attr
                .unescape_value()
                .map_err(|e| {
                    BindXmlError::MalformedDocument(format!("Failed to decode XML value: {}", e))
                })?
                .into_owned();
            Ok((key, value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn close_element(
    mut element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
) -> Result<()> {
    let trimmed = element.text.trim();
    if trimmed.len() != element.text.len() {
        element.text = trimmed.to_string();
    }

    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(BindXmlError::MalformedDocument(format!(
                "Second root element <{}> after the document root",
                element.name
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}
