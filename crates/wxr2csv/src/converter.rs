//! Document registry and discovery queries.

use wxr2csv_dom::WxrDocument;

use crate::config::ExportConfig;
use crate::export::{self, ExportFile};
use crate::Result;

/// Registry of parsed WXR documents.
///
/// Documents are registered once and never mutated. The discovery queries
/// and [`Converter::export`] are pure reads, so they can be called any
/// number of times and always see the documents in registration order.
#[derive(Debug, Default)]
pub struct Converter {
    documents: Vec<WxrDocument>,
}

impl Converter {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-parsed document.
    pub fn add_document(&mut self, document: WxrDocument) {
        self.documents.push(document);
    }

    /// Parse raw XML text and register the resulting document.
    ///
    /// When the text is not well-formed XML nothing is registered.
    pub fn add_xml(&mut self, xml: &str) -> Result<()> {
        let document = WxrDocument::parse(xml)?;
        self.documents.push(document);
        Ok(())
    }

    /// Distinct post types found in `<wp:post_type>` elements across all
    /// documents, in first-seen order. Empty values are excluded.
    pub fn post_types(&self) -> Vec<String> {
        self.distinct_text("wp:post_type", |_| true)
    }

    /// Distinct custom-field keys found in `<wp:meta_key>` elements across
    /// all documents, in first-seen order. Keys starting with an underscore
    /// are private WordPress fields and are excluded.
    pub fn custom_fields(&self) -> Vec<String> {
        self.distinct_text("wp:meta_key", |key| !key.starts_with('_'))
    }

    /// Run an export over all registered documents.
    ///
    /// Returns one [`ExportFile`] per non-empty record set, in fixed
    /// categories/posts/pages order. The registry is left untouched.
    pub fn export(&self, config: &ExportConfig) -> Result<Vec<ExportFile>> {
        export::run(&self.documents, config)
    }

    fn distinct_text(&self, tag: &str, keep: impl Fn(&str) -> bool) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();

        for document in &self.documents {
            for element in document.elements_by_tag_name(tag) {
                let value = element.text();
                if value.is_empty() || !keep(value) {
                    continue;
                }
                if !values.iter().any(|seen| seen == value) {
                    values.push(value.to_string());
                }
            }
        }

        values
    }
}
