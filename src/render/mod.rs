//! Rendering module for converting documents to output formats.

mod html;
mod markdown;
mod options;
mod records;

pub use html::to_html;
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{OutputFormat, RenderOptions};
pub use records::{records_to_json, to_records, DocumentRecords, JsonFormat, TableRecords};

use crate::error::Result;
use crate::model::Document;

/// Render a document to the given output format.
///
/// `Records` renders as pretty-printed JSON; use [`to_records`] directly
/// for the structured value.
pub fn render(doc: &Document, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Markdown => to_markdown(doc, options),
        OutputFormat::Html => to_html(doc, options),
        OutputFormat::Records => records_to_json(&to_records(doc)?, JsonFormat::Pretty),
    }
}
