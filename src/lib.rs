//! # docgrid
//!
//! Intermediate document model for document-AI conversion pipelines.
//!
//! A parsing backend (layout analysis, OCR, table detection) produces an
//! ordered, immutable element store with positional metadata; docgrid
//! validates table structure, resolves table captions from nearby text,
//! and renders the result to Markdown, HTML, or flat records.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docgrid::{from_json, resolve_titles, render, OutputFormat, RenderOptions, ResolveOptions};
//!
//! fn main() -> docgrid::Result<()> {
//!     let data = std::fs::read("document.json")?;
//!
//!     // Load a document serialized by the parsing backend
//!     let mut doc = from_json(&data)?;
//!
//!     // Attach captions to tables
//!     resolve_titles(&mut doc, &ResolveOptions::default())?;
//!
//!     // Convert to Markdown
//!     let markdown = render(&doc, OutputFormat::Markdown, &RenderOptions::default())?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Validated table model**: cell spans checked against the grid, never
//!   silently repaired
//! - **Spatial index**: nearest-above/below queries per page
//! - **Caption resolution**: configurable label and distance heuristics
//! - **Multiple output formats**: Markdown, HTML, structured records
//! - **Parallel resolution**: per-table via Rayon over immutable data

pub mod backend;
pub mod error;
pub mod model;
pub mod render;
pub mod resolve;
pub mod spatial;

// Re-export commonly used types
pub use backend::{JsonBackend, ParseBackend, ParseOptions};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, Cell, CellKind, Document, DocumentBuilder, Element, ElementKind, Grid, PageInfo,
    Record, Table,
};
pub use render::{
    records_to_json, render, to_html, to_markdown, to_records, DocumentRecords, JsonFormat,
    OutputFormat, RenderOptions, TableRecords,
};
pub use resolve::{resolve_titles, CaptionMatcher, ResolveOptions};
pub use spatial::SpatialIndex;

/// Load a serialized document with default options.
///
/// # Example
///
/// ```no_run
/// use docgrid::from_json;
///
/// let data = std::fs::read("document.json").unwrap();
/// let doc = from_json(&data).unwrap();
/// println!("Elements: {}", doc.element_count());
/// ```
pub fn from_json(data: &[u8]) -> Result<Document> {
    JsonBackend::new().parse(data, &ParseOptions::default())
}

/// Load a serialized document with custom options.
pub fn from_json_with_options(data: &[u8], options: &ParseOptions) -> Result<Document> {
    JsonBackend::new().parse(data, options)
}

/// Builder for loading, resolving, and rendering documents.
///
/// # Example
///
/// ```no_run
/// use docgrid::Docgrid;
///
/// let data = std::fs::read("document.json")?;
/// let markdown = Docgrid::new()
///     .with_caption_distance(60.0)
///     .parse_bytes(&data)?
///     .to_markdown()?;
/// # Ok::<(), docgrid::Error>(())
/// ```
pub struct Docgrid {
    parse_options: ParseOptions,
    resolve_options: ResolveOptions,
    render_options: RenderOptions,
}

impl Docgrid {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            resolve_options: ResolveOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable OCR in the parsing backend.
    pub fn with_ocr(mut self, enabled: bool) -> Self {
        self.parse_options = self.parse_options.with_ocr(enabled);
        self
    }

    /// Set the layout sensitivity for the parsing backend.
    pub fn with_layout_sensitivity(mut self, sensitivity: f32) -> Self {
        self.parse_options = self.parse_options.with_layout_sensitivity(sensitivity);
        self
    }

    /// Set the table detection threshold for the parsing backend.
    pub fn with_table_detection_threshold(mut self, threshold: f32) -> Self {
        self.parse_options = self
            .parse_options
            .with_table_detection_threshold(threshold);
        self
    }

    /// Set the caption distance threshold in points.
    pub fn with_caption_distance(mut self, points: f32) -> Self {
        self.resolve_options = self.resolve_options.with_distance_threshold(points);
        self
    }

    /// Replace the caption label tokens.
    pub fn with_caption_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.resolve_options = self.resolve_options.with_caption_labels(labels);
        self
    }

    /// Disable parallel resolution.
    pub fn sequential(mut self) -> Self {
        self.resolve_options = self.resolve_options.sequential();
        self
    }

    /// Enable or disable caption attachment in rendered output.
    pub fn with_captions(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_captions(include);
        self
    }

    /// Parse serialized document bytes, resolve table titles, and return a
    /// result wrapper.
    pub fn parse_bytes(self, data: &[u8]) -> Result<DocgridResult> {
        let mut document = JsonBackend::new().parse(data, &self.parse_options)?;
        resolve_titles(&mut document, &self.resolve_options)?;
        Ok(DocgridResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Wrap an already-built document, resolving table titles.
    pub fn resolve(self, mut document: Document) -> Result<DocgridResult> {
        resolve_titles(&mut document, &self.resolve_options)?;
        Ok(DocgridResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Docgrid {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document with resolution applied, ready to render.
pub struct DocgridResult {
    /// The resolved document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl DocgridResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to an HTML fragment.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Extract flat table records.
    pub fn to_records(&self) -> Result<DocumentRecords> {
        render::to_records(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
