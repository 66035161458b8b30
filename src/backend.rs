//! Parsing backend abstraction.
//!
//! Document parsing (layout analysis, OCR, table-structure detection) is
//! the job of an external document-AI backend. This module defines the
//! interface such a backend plugs into, plus [`JsonBackend`], which loads a
//! document the external service has already serialized.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Document;

/// Recognized backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Whether the backend should run OCR on raster content
    pub ocr_enabled: bool,

    /// Layout-model sensitivity, in `[0, 1]`
    pub layout_sensitivity: f32,

    /// Table detection confidence threshold, in `[0, 1]`
    pub table_detection_threshold: f32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable OCR.
    pub fn with_ocr(mut self, enabled: bool) -> Self {
        self.ocr_enabled = enabled;
        self
    }

    /// Set the layout sensitivity.
    pub fn with_layout_sensitivity(mut self, sensitivity: f32) -> Self {
        self.layout_sensitivity = sensitivity;
        self
    }

    /// Set the table detection threshold.
    pub fn with_table_detection_threshold(mut self, threshold: f32) -> Self {
        self.table_detection_threshold = threshold;
        self
    }

    /// Check that all settings are within their accepted ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.layout_sensitivity) {
            return Err(Error::InvalidOption(format!(
                "layout_sensitivity must be in [0, 1], got {}",
                self.layout_sensitivity
            )));
        }
        if !(0.0..=1.0).contains(&self.table_detection_threshold) {
            return Err(Error::InvalidOption(format!(
                "table_detection_threshold must be in [0, 1], got {}",
                self.table_detection_threshold
            )));
        }
        Ok(())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ocr_enabled: false,
            layout_sensitivity: 0.5,
            table_detection_threshold: 0.5,
        }
    }
}

/// Abstract interface to a document parsing backend.
///
/// A backend turns raw source bytes into a [`Document`] — or fails with a
/// parse error that is fatal to that document only.
pub trait ParseBackend {
    /// Backend name, for logging and diagnostics.
    fn name(&self) -> &str;

    /// Parse source bytes into a document.
    fn parse(&self, data: &[u8], options: &ParseOptions) -> Result<Document>;
}

/// Backend that loads a document serialized by an external document-AI
/// service.
///
/// Re-validates every store and table invariant on the way in: a document
/// that deserializes but violates an invariant is rejected with
/// [`Error::Structural`] rather than repaired.
#[derive(Debug, Default)]
pub struct JsonBackend;

impl JsonBackend {
    /// Create a new JSON backend.
    pub fn new() -> Self {
        Self
    }
}

impl ParseBackend for JsonBackend {
    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, data: &[u8], options: &ParseOptions) -> Result<Document> {
        options.validate()?;
        let doc: Document = serde_json::from_slice(data)?;
        doc.validate()?;
        log::debug!(
            "json backend: loaded {} elements on {} pages",
            doc.element_count(),
            doc.page_count()
        );
        Ok(doc)
    }
}
