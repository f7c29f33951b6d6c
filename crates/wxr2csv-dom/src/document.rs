//! Parse XML text into an element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Element, Error, Result};

/// A parsed WXR document.
///
/// The tree is immutable after parsing; all queries are read-only.
#[derive(Debug, Clone)]
pub struct WxrDocument {
    root: Element,
}

impl WxrDocument {
    /// Parse XML text into a document.
    ///
    /// Declarations, comments, processing instructions and doctypes are
    /// skipped. Fails if the text is not well-formed XML or contains no
    /// root element.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader
                .read_event()
                .map_err(|e| Error::Parse(e.to_string()))?
            {
                Event::Start(e) => {
                    stack.push(read_element(&e));
                }
                Event::Empty(e) => {
                    let element = read_element(&e);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    } else if root.is_none() {
                        root = Some(element);
                    }
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(element);
                        } else if root.is_none() {
                            root = Some(element);
                        }
                    }
                }
                Event::Text(e) => {
                    if let Some(element) = stack.last_mut() {
                        let text = e.unescape().map_err(|e| Error::Parse(e.to_string()))?;
                        element.text.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(element) = stack.last_mut() {
                        element
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        root.map(|root| WxrDocument { root })
            .ok_or(Error::NoRootElement)
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// All elements with the given qualified tag name, root included, in
    /// document order.
    pub fn elements_by_tag_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .filter(move |e| e.name == name)
    }
}

fn read_element(start: &BytesStart<'_>) -> Element {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

    for attr in start.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        element.attributes.push((key, value));
    }

    element
}
