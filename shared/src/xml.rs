//! Attribute-less XML to JSON conversion.
//!
//! Mirrors the common "no explicit array" mapping used by XML API adapters:
//!
//! - attributes are dropped;
//! - an element with only text becomes a string (`""` when empty);
//! - an element with child elements becomes an object;
//! - a child name repeated under one parent becomes an array, in document order;
//! - text mixed with child elements is kept under the `"_"` key.
//!
//! The result is an object with the root element's name as its single key.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::XmlError;

/// Key holding character data of an element that also has child elements.
pub const TEXT_KEY: &str = "_";

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            children: Map::new(),
            text: String::new(),
        }
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                // Element values are strings or objects, so an array here is
                // an already-collapsed repeated child.
                Value::Array(items) => items.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }

    fn close(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            Value::String(self.text)
        } else {
            let mut children = self.children;
            if !self.text.is_empty() {
                children.insert(TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(children)
        };
        (self.name, value)
    }
}

/// Parses `xml` into a JSON value.
///
/// # Errors
///
/// Returns [`XmlError`] when the document is not well formed, has no root
/// element, or has more than one.
pub fn to_json(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event().map_err(|err| XmlError::Syntax {
            position: reader.buffer_position(),
            message: err.to_string(),
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(multiple_roots(&reader));
                }
                stack.push(Frame::open(&start));
            }
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start).close();
                match stack.last_mut() {
                    Some(parent) => parent.add_child(name, value),
                    None if root.is_none() => root = Some((name, value)),
                    None => return Err(multiple_roots(&reader)),
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let unescaped = text.unescape().map_err(|err| XmlError::Syntax {
                        position: reader.buffer_position(),
                        message: err.to_string(),
                    })?;
                    frame.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                // quick-xml verifies that end tags match their start tags.
                if let Some(frame) = stack.pop() {
                    let (name, value) = frame.close();
                    match stack.last_mut() {
                        Some(parent) => parent.add_child(name, value),
                        None => root = Some((name, value)),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnexpectedEof(open.name));
    }

    let (name, value) = root.ok_or(XmlError::Empty)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn multiple_roots(reader: &Reader<&[u8]>) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position(),
        message: "multiple root elements".to_string(),
    }
}
