//! Error types for WXR document parsing.

use thiserror::Error;

/// Errors that can occur when parsing a WXR document.
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not well-formed XML.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The input contained no root element.
    #[error("no root element found in XML")]
    NoRootElement,
}

/// Result type for WXR document operations.
pub type Result<T> = std::result::Result<T, Error>;
