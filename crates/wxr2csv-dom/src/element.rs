//! Owned XML element tree.

/// A single element in a parsed document.
///
/// Tag names keep their namespace prefix verbatim, so a lookup for
/// `wp:post_type` matches exactly the elements written that way in the
/// source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Qualified tag name, prefix included.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Concatenated text and CDATA content, untrimmed.
    pub text: String,
}

impl Element {
    pub(crate) fn new(name: String) -> Self {
        Element {
            name,
            ..Default::default()
        }
    }

    /// Text content of this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All descendant elements in depth-first document order, self excluded.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Descendant elements with the given qualified tag name, in document
    /// order.
    pub fn elements_by_tag_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.name == name)
    }

    /// Concatenated text of all matching descendant elements; empty when
    /// none match.
    pub fn child_text(&self, name: &str) -> String {
        let mut out = String::new();
        for element in self.elements_by_tag_name(name) {
            out.push_str(&element.text);
        }
        out
    }
}

/// Depth-first iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
