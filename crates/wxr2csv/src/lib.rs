//! WordPress WXR export to CSV conversion core.
//!
//! Parses WXR (WordPress eXtended RSS) export documents and converts the
//! categories, posts and pages they contain into CSV record sets suitable
//! for import into another blogging platform.
//!
//! The flow is discover-then-export: register one or more documents with a
//! [`Converter`], query [`Converter::post_types`] and
//! [`Converter::custom_fields`] to learn what the data contains, build an
//! [`ExportConfig`] mapping that to output columns, and call
//! [`Converter::export`] to get named CSV payloads ready for packaging.
//!
//! # Example
//!
//! ```no_run
//! use wxr2csv::{Converter, ExportConfig, PostKind};
//!
//! let xml = std::fs::read_to_string("export.xml")?;
//!
//! let mut converter = Converter::new();
//! converter.add_xml(&xml)?;
//!
//! let config = ExportConfig {
//!     post_type_map: vec![("post".to_string(), PostKind::Post)],
//!     ..Default::default()
//! };
//!
//! for file in converter.export(&config)? {
//!     println!("{}: {} bytes", file.filename, file.data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod autop;
mod config;
mod converter;
mod error;
mod export;

pub use config::{ConvertBreaks, ExportConfig, PostKind};
pub use converter::Converter;
pub use error::{Error, Result};
pub use export::ExportFile;

// Re-export so callers can pre-parse documents without naming the dom crate.
pub use wxr2csv_dom::WxrDocument;
