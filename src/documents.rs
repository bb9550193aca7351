//! XML document handling
//!
//! This module parses XML text into an owned element tree. Only the parts of
//! the document that can influence graph extraction are kept: element tags,
//! attributes and nesting.

use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Attribute carrying an element's name
pub const NAME_ATTRIBUTE: &str = "name";

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element tag as written, including any prefix (`xs:element`)
    pub tag: String,
    /// Element attributes in document order, keyed by qualified name
    pub attributes: IndexMap<String, String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder: add a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    /// Get the local name of the element (tag without prefix)
    pub fn local_name(&self) -> &str {
        match self.tag.split_once(':') {
            Some((_, local)) => local,
            None => &self.tag,
        }
    }

    /// Get the tag prefix, if any
    pub fn prefix(&self) -> Option<&str> {
        self.tag.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Get an attribute value by its qualified name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }

    /// The element's `name` attribute, if present and non-empty
    pub fn name(&self) -> Option<&str> {
        self.attribute(NAME_ATTRIBUTE).filter(|name| !name.is_empty())
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Iterate over this element and all of its descendants, depth-first
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Depth-first iterator over an element subtree
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        self.stack.extend(elem.children.iter().rev());
        Some(elem)
    }
}

/// XML Document representation
#[derive(Debug, Clone)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes using default limits
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from bytes
    pub fn parse_with_limits(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut root: Option<Element> = None;
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, limits, xml, position)?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    let current = element_stack.pop().ok_or_else(|| {
                        ParseError::new("closing tag without matching opening tag")
                            .at_offset(xml, position)
                    })?;
                    Self::attach(current, &mut element_stack, &mut root, xml, position)?;
                }
                Ok(Event::Empty(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, limits, xml, position)?;
                    Self::attach(element, &mut element_stack, &mut root, xml, position)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::new(e.to_string())
                        .at_offset(xml, reader.buffer_position())
                        .into())
                }
                _ => {} // Text, comments, processing instructions, DOCTYPE, CDATA
            }
            buf.clear();
        }

        if let Some(open) = element_stack.last() {
            return Err(ParseError::new(format!("unclosed element <{}>", open.tag))
                .at_offset(xml, xml.len())
                .into());
        }

        let root = root.ok_or_else(|| Error::from(ParseError::new("document has no root element")))?;
        Ok(Document { root })
    }

    /// Attach a completed element to its parent, or make it the root
    fn attach(
        element: Element,
        element_stack: &mut [Element],
        root: &mut Option<Element>,
        xml: &[u8],
        position: usize,
    ) -> Result<()> {
        if let Some(parent) = element_stack.last_mut() {
            parent.add_child(element);
        } else if root.is_some() {
            return Err(ParseError::new(format!(
                "multiple root elements: unexpected <{}>",
                element.tag
            ))
            .at_offset(xml, position)
            .into());
        } else {
            *root = Some(element);
        }
        Ok(())
    }

    /// Parse element from BytesStart event
    fn parse_element(
        start: &BytesStart,
        limits: &Limits,
        xml: &[u8],
        position: usize,
    ) -> Result<Element> {
        let syntax = |msg: String| Error::from(ParseError::new(msg).at_offset(xml, position));

        let tag = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| syntax(format!("invalid element name: {}", e)))?
            .to_string();

        let mut element = Element::new(tag);

        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| syntax(format!("invalid attribute: {}", e)))?;

            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| syntax(format!("invalid attribute name: {}", e)))?
                .to_string();

            let value = attr
                .unescape_value()
                .map_err(|e| syntax(format!("invalid value for attribute '{}': {}", key, e)))?
                .into_owned();

            element.set_attribute(key, value);
            limits.check_attributes(element.attributes.len())?;
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consume the document, returning its root element
    pub fn into_root(self) -> Element {
        self.root
    }
}
