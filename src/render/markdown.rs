//! Markdown rendering.

use std::collections::HashSet;

use crate::error::Result;
use crate::model::{Document, Element, ElementKind, Table};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let claimed = claimed_titles(doc, &self.options);
        let mut output = String::new();

        for el in doc.elements() {
            if claimed.contains(&el.index) {
                // Emitted with the table that claimed it.
                continue;
            }
            self.render_element(&mut output, doc, el)?;
        }

        Ok(output.trim().to_string())
    }

    fn render_element(&self, output: &mut String, doc: &Document, el: &Element) -> Result<()> {
        match &el.kind {
            ElementKind::Header { text, level } => {
                let level = (*level).clamp(1, self.options.max_heading_level);
                output.push_str(&"#".repeat(level as usize));
                output.push(' ');
                output.push_str(&self.escape(text));
                output.push_str("\n\n");
            }
            ElementKind::TextBlock { text } => {
                if !text.trim().is_empty() {
                    output.push_str(&self.escape(text));
                    output.push_str("\n\n");
                }
            }
            ElementKind::Figure { alt_text } => match alt_text {
                Some(alt) if !alt.trim().is_empty() => {
                    output.push('*');
                    output.push_str(&self.escape(alt));
                    output.push_str("*\n\n");
                }
                _ => output.push_str("<!-- figure -->\n\n"),
            },
            ElementKind::Table(table) => {
                self.render_table(output, doc, table)?;
            }
        }
        Ok(())
    }

    fn render_table(&self, output: &mut String, doc: &Document, table: &Table) -> Result<()> {
        if self.options.include_captions {
            if let Some(title_text) = title_text(doc, table) {
                output.push_str("**");
                output.push_str(&self.escape(title_text));
                output.push_str("**\n\n");
            }
        }

        let grid = table.grid()?;
        for row in 0..table.row_count {
            output.push('|');
            for column in 0..table.column_count {
                let text = match grid.cell_at(row, column) {
                    Some(cell) => escape_cell(&cell.text),
                    None => escape_cell(&self.options.empty_cell),
                };
                output.push(' ');
                output.push_str(&text);
                output.push_str(" |");
            }
            output.push('\n');

            // Separator after the first row makes it the header row.
            if row == 0 {
                output.push('|');
                for _ in 0..table.column_count {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }
        output.push('\n');
        Ok(())
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Document-order indices of elements claimed as table titles.
pub(super) fn claimed_titles(doc: &Document, options: &RenderOptions) -> HashSet<usize> {
    if !options.include_captions {
        return HashSet::new();
    }
    doc.tables()
        .filter_map(|el| el.as_table())
        .filter_map(|t| t.title)
        .collect()
}

/// Text of a table's resolved title element, if any.
pub(super) fn title_text<'a>(doc: &'a Document, table: &Table) -> Option<&'a str> {
    table.title.and_then(|i| doc.by_index(i)).and_then(Element::text)
}

/// Escape characters with Markdown meaning.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '*' | '_' | '`' | '[' | ']' | '#' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Escape a value for use inside a pipe table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Cell, DocumentBuilder, PageInfo};

    fn bbox(y0: f32, y1: f32) -> BoundingBox {
        BoundingBox::new(50.0, y0, 500.0, y1)
    }

    fn sample_doc() -> Document {
        let mut builder = DocumentBuilder::new().page(PageInfo::letter(0));
        builder.add_header(0, bbox(40.0, 60.0), "Results", 2);
        builder.add_text_block(0, bbox(80.0, 100.0), "Quarterly summary.");
        let table = Table::new(
            2,
            2,
            vec![
                Cell::text(0, 0, "Segment"),
                Cell::text(0, 1, "Revenue"),
                Cell::text(1, 0, "Cloud"),
                Cell::text(1, 1, "1,200"),
            ],
        )
        .unwrap();
        builder.add_table(0, bbox(120.0, 200.0), table);
        builder.build().unwrap()
    }

    #[test]
    fn test_markdown_structure() {
        let md = to_markdown(&sample_doc(), &RenderOptions::default()).unwrap();

        assert!(md.starts_with("## Results"));
        assert!(md.contains("Quarterly summary."));
        assert!(md.contains("| Segment | Revenue |"));
        assert!(md.contains("| --- | --- |"));
        assert!(md.contains("| Cloud | 1,200 |"));
    }

    #[test]
    fn test_caption_attached_and_deduped() {
        let mut doc = sample_doc();
        // Claim the "Results" header as the table's title.
        doc.table_mut(2).unwrap().title = Some(0);

        let md = to_markdown(&doc, &RenderOptions::default()).unwrap();
        assert!(md.contains("**Results**"));
        // Claimed header is no longer emitted as a heading.
        assert!(!md.contains("## Results"));
    }

    #[test]
    fn test_captions_disabled() {
        let mut doc = sample_doc();
        doc.table_mut(2).unwrap().title = Some(0);

        let options = RenderOptions::new().with_captions(false);
        let md = to_markdown(&doc, &options).unwrap();
        assert!(!md.contains("**Results**"));
        assert!(md.contains("## Results"));
    }

    #[test]
    fn test_pipe_escaped_in_cells() {
        let mut builder = DocumentBuilder::new().page(PageInfo::letter(0));
        let table = Table::new(1, 1, vec![Cell::text(0, 0, "a|b")]).unwrap();
        builder.add_table(0, bbox(40.0, 80.0), table);
        let doc = builder.build().unwrap();

        let md = to_markdown(&doc, &RenderOptions::default()).unwrap();
        assert!(md.contains("a\\|b"));
    }

    #[test]
    fn test_empty_cell_placeholder() {
        let mut builder = DocumentBuilder::new().page(PageInfo::letter(0));
        let table = Table::new(1, 2, vec![Cell::text(0, 0, "only")]).unwrap();
        builder.add_table(0, bbox(40.0, 80.0), table);
        let doc = builder.build().unwrap();

        let options = RenderOptions::new().with_empty_cell("—");
        let md = to_markdown(&doc, &options).unwrap();
        assert!(md.contains("| only | — |"));
    }
}
