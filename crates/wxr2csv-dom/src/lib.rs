//! Lightweight XML element tree for WordPress WXR documents.
//!
//! WXR (WordPress eXtended RSS) exports are namespaced RSS documents. This
//! crate parses the XML text into an owned element tree that keeps qualified
//! tag names (`wp:post_type`, `content:encoded`) verbatim, so documents can
//! be queried the way a namespace-aware DOM would be. Text and CDATA content
//! is preserved untrimmed because post bodies live in CDATA sections where
//! whitespace is significant.
//!
//! # Example
//!
//! ```
//! use wxr2csv_dom::WxrDocument;
//!
//! let doc = WxrDocument::parse(
//!     "<rss><channel><wp:post_type>post</wp:post_type></channel></rss>",
//! )?;
//!
//! let types: Vec<_> = doc
//!     .elements_by_tag_name("wp:post_type")
//!     .map(|e| e.text())
//!     .collect();
//! assert_eq!(types, ["post"]);
//! # Ok::<(), wxr2csv_dom::Error>(())
//! ```

mod document;
mod element;
mod error;

pub use document::WxrDocument;
pub use element::{Descendants, Element};
pub use error::{Error, Result};
