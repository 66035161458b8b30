//! Error types for the docgrid library.

use std::io;
use thiserror::Error;

/// Result type alias for docgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, validating, or rendering
/// a document model.
///
/// Expected absences (no caption found, index out of range) are `Option`
/// values on the query surface, not errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backend failed to produce a document.
    ///
    /// Fatal to the document being parsed; other documents in a batch are
    /// unaffected.
    #[error("parse error: {0}")]
    Parse(String),

    /// An internal invariant was violated during model construction.
    ///
    /// Indicates inconsistent upstream detection output (e.g. two table
    /// cells claiming the same grid position). Never silently repaired.
    #[error("structural error: {0}")]
    Structural(String),

    /// A parse or resolve option is outside its accepted range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Error during rendering (Markdown, HTML, records).
    #[error("rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Structural("cell (1, 2) overlaps an occupied position".to_string());
        assert_eq!(
            err.to_string(),
            "structural error: cell (1, 2) overlaps an occupied position"
        );

        let err = Error::InvalidOption("layout_sensitivity must be in [0, 1]".to_string());
        assert!(err.to_string().starts_with("invalid option"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
