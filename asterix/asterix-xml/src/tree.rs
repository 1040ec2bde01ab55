//! Minimal element tree built from `quick-xml` events.
//!
//! Descriptor documents are small, so they are read into memory once and
//! converted from the tree. Comments, processing instructions and the
//! doctype are dropped.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::error::XmlSchemaError;

#[derive(Debug, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated, trimmed text content.
    pub text: String,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn required_attribute(&self, name: &'static str) -> Result<&str, XmlSchemaError> {
        self.attribute(name)
            .ok_or_else(|| XmlSchemaError::MissingAttribute {
                element: self.name.clone(),
                attribute: name,
            })
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Parses `xml` and returns its root element.
pub(crate) fn parse_document(xml: &str) -> Result<Element, XmlSchemaError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(XmlSchemaError::UnexpectedEof)?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => return Err(XmlSchemaError::UnexpectedEof),
            _ => {}
        }
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, XmlSchemaError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let attributes = start
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, XmlSchemaError>>()?;

    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

/// Appends a closed element to its parent, or hands it back when it is the
/// root.
fn attach(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            None
        }
        None => Some(element),
    }
}
