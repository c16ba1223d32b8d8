//! A minimal XML-to-tree reader on top of the quick-xml event stream.
//!
//! Anything the parser itself rejects, plus mismatched or stray tags and
//! content outside the document element, is an xml-format error; the tree is
//! checked against the program format afterwards.

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::LoadError;

#[derive(Debug, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

fn malformed(message: impl fmt::Display) -> LoadError {
    LoadError::Xml(message.to_string())
}

fn open_element(start: &BytesStart) -> Result<Element, LoadError> {
    let name = String::from_utf8(start.name().as_ref().to_vec()).map_err(malformed)?;

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(malformed)?;
        let key = String::from_utf8(attribute.key.as_ref().to_vec()).map_err(malformed)?;
        let value = attribute.unescape_value().map_err(malformed)?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element { name, attributes, ..Element::default() })
}

/// Parses a document into its single root element.
pub fn parse_document(source: &str) -> Result<Element, LoadError> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(malformed("content after the document element"));
                }
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(malformed("content after the document element"));
                }
                let element = open_element(&start)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(end) => {
                let element = match stack.pop() {
                    Some(element) => element,
                    None => return Err(malformed("unexpected closing tag")),
                };
                if end.name().as_ref() != element.name.as_bytes() {
                    return Err(malformed(format!("mismatched closing tag for <{}>", element.name)));
                }
                close_element(element, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let decoded = text.unescape().map_err(malformed)?;
                match stack.last_mut() {
                    Some(parent) => parent.text.push_str(&decoded),
                    None if decoded.trim().is_empty() => {}
                    None => return Err(malformed("text outside the document element")),
                }
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let decoded = std::str::from_utf8(&bytes).map_err(malformed)?;
                match stack.last_mut() {
                    Some(parent) => parent.text.push_str(decoded),
                    None => return Err(malformed("text outside the document element")),
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no program content.
            _ => {}
        }
    }

    if let Some(element) = stack.pop() {
        return Err(malformed(format!("<{}> is never closed", element.name)));
    }
    root.ok_or_else(|| malformed("missing document element"))
}

fn close_element(element: Element, stack: &mut Vec<Element>, root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
