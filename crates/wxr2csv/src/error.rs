//! Error types for the conversion core.

use thiserror::Error;

/// Errors that can occur while registering documents or exporting.
///
/// Every failure aborts the current call and leaves registry state
/// unchanged; nothing is retried or logged internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Input XML could not be parsed; no document was registered.
    #[error("failed to parse WXR document: {0}")]
    Parse(#[from] wxr2csv_dom::Error),

    /// CSV row encoding failed; the export produced no output.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Serialized CSV was not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
