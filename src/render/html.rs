//! HTML rendering.
//!
//! Unlike the Markdown renderer, HTML expresses cell spans natively via
//! `rowspan`/`colspan` attributes, and resolved titles become `<caption>`
//! elements.

use crate::error::Result;
use crate::model::{Document, Element, ElementKind, Table};

use super::markdown::{claimed_titles, title_text};
use super::RenderOptions;

/// Convert a document to an HTML fragment.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let claimed = claimed_titles(doc, options);
    let mut output = String::new();

    for el in doc.elements() {
        if claimed.contains(&el.index) {
            continue;
        }
        render_element(&mut output, doc, el, options)?;
    }

    Ok(output.trim_end().to_string())
}

fn render_element(
    output: &mut String,
    doc: &Document,
    el: &Element,
    options: &RenderOptions,
) -> Result<()> {
    match &el.kind {
        ElementKind::Header { text, level } => {
            let level = (*level).clamp(1, options.max_heading_level);
            output.push_str(&format!("<h{}>{}</h{}>\n", level, escape_html(text), level));
        }
        ElementKind::TextBlock { text } => {
            if !text.trim().is_empty() {
                output.push_str(&format!("<p>{}</p>\n", escape_html(text)));
            }
        }
        ElementKind::Figure { alt_text } => {
            let alt = alt_text.as_deref().unwrap_or("");
            output.push_str(&format!(
                "<figure><figcaption>{}</figcaption></figure>\n",
                escape_html(alt)
            ));
        }
        ElementKind::Table(table) => render_table(output, doc, table, options)?,
    }
    Ok(())
}

fn render_table(
    output: &mut String,
    doc: &Document,
    table: &Table,
    options: &RenderOptions,
) -> Result<()> {
    output.push_str("<table>\n");

    if options.include_captions {
        if let Some(title) = title_text(doc, table) {
            output.push_str(&format!("<caption>{}</caption>\n", escape_html(title)));
        }
    }

    let grid = table.grid()?;
    for row in 0..table.row_count {
        output.push_str("<tr>");
        for column in 0..table.column_count {
            match grid.cell_at(row, column) {
                Some(cell) => {
                    // Spanned continuations are covered by their anchor.
                    if !grid.is_anchor(row, column) {
                        continue;
                    }
                    let tag = if row == 0 { "th" } else { "td" };
                    output.push('<');
                    output.push_str(tag);
                    if cell.row_span > 1 {
                        output.push_str(&format!(" rowspan=\"{}\"", cell.row_span));
                    }
                    if cell.col_span > 1 {
                        output.push_str(&format!(" colspan=\"{}\"", cell.col_span));
                    }
                    output.push('>');
                    output.push_str(&escape_html(&cell.text));
                    output.push_str(&format!("</{}>", tag));
                }
                None => {
                    let tag = if row == 0 { "th" } else { "td" };
                    output.push_str(&format!(
                        "<{}>{}</{}>",
                        tag,
                        escape_html(&options.empty_cell),
                        tag
                    ));
                }
            }
        }
        output.push_str("</tr>\n");
    }

    output.push_str("</table>\n");
    Ok(())
}

/// Escape HTML metacharacters.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
