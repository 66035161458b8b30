//! Document-level types.
//!
//! [`Document`] is the element store: every parsed element in document
//! order, with positional metadata. It is produced in one parse pass and is
//! read-only afterwards; the only later write is the context resolver
//! filling in table titles.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, Element, ElementKind, PageInfo, Table};
use crate::error::{Error, Result};

/// A parsed document: ordered elements plus page geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<PageInfo>,

    /// Elements in document order
    pub elements: Vec<Element>,
}

impl Document {
    /// Get all elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Look up an element by its document-order index.
    ///
    /// Returns `None` when no element carries that index; absence is
    /// expected, not an error.
    pub fn by_index(&self, index: usize) -> Option<&Element> {
        // Indices are strictly increasing, so the store is sorted by them.
        self.elements
            .binary_search_by_key(&index, |el| el.index)
            .ok()
            .map(|pos| &self.elements[pos])
    }

    /// Get the number of elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has any elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get geometry for a page by number.
    pub fn page_info(&self, page: u32) -> Option<&PageInfo> {
        self.pages.iter().find(|p| p.number == page)
    }

    /// Iterate over the table elements in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| el.is_table())
    }

    /// Document-order indices of all table elements.
    pub fn table_indices(&self) -> Vec<usize> {
        self.tables().map(|el| el.index).collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|el| match &el.kind {
                ElementKind::TextBlock { text } => Some(text.clone()),
                ElementKind::Header { text, .. } => Some(text.clone()),
                ElementKind::Table(table) => Some(table.plain_text()),
                ElementKind::Figure { .. } => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Validate store invariants.
    ///
    /// Used when a document arrives from an external backend rather than
    /// through [`DocumentBuilder`]: indices must be strictly increasing,
    /// bounding boxes well-formed, page references known, and every table
    /// grid free of overlapping cells.
    pub fn validate(&self) -> Result<()> {
        let mut last_index: Option<usize> = None;
        for el in &self.elements {
            if let Some(last) = last_index {
                if el.index <= last {
                    return Err(Error::Structural(format!(
                        "element indices must be strictly increasing: {} follows {}",
                        el.index, last
                    )));
                }
            }
            last_index = Some(el.index);

            if !el.bbox.is_valid() {
                return Err(Error::Structural(format!(
                    "element {} has a malformed bounding box",
                    el.index
                )));
            }
            if self.page_info(el.page).is_none() {
                return Err(Error::Structural(format!(
                    "element {} references unknown page {}",
                    el.index, el.page
                )));
            }
            if let ElementKind::Table(table) = &el.kind {
                // Rebuilds the occupancy map; surfaces overlap as Structural.
                table.grid()?;
                if let Some(title) = table.title {
                    if self.by_index(title).is_none() {
                        return Err(Error::Structural(format!(
                            "table {} references unknown title element {}",
                            el.index, title
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Mutable access to a table payload, for the context resolver.
    pub(crate) fn table_mut(&mut self, index: usize) -> Option<&mut Table> {
        let pos = self
            .elements
            .binary_search_by_key(&index, |el| el.index)
            .ok()?;
        match &mut self.elements[pos].kind {
            ElementKind::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Builder for [`Document`] — the single mutation point of the store.
///
/// Assigns strictly increasing document-order indices as elements are
/// added; `build` validates the assembled store.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    pages: Vec<PageInfo>,
    elements: Vec<Element>,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page and return the builder.
    pub fn page(mut self, page: PageInfo) -> Self {
        self.pages.push(page);
        self
    }

    /// Add a page in place.
    pub fn add_page(&mut self, page: PageInfo) {
        self.pages.push(page);
    }

    /// Add a text block; returns its document-order index.
    pub fn add_text_block(
        &mut self,
        page: u32,
        bbox: BoundingBox,
        text: impl Into<String>,
    ) -> usize {
        self.push(page, bbox, ElementKind::TextBlock { text: text.into() })
    }

    /// Add a header; returns its document-order index.
    pub fn add_header(
        &mut self,
        page: u32,
        bbox: BoundingBox,
        text: impl Into<String>,
        level: u8,
    ) -> usize {
        self.push(
            page,
            bbox,
            ElementKind::Header {
                text: text.into(),
                level,
            },
        )
    }

    /// Add a table; returns its document-order index.
    pub fn add_table(&mut self, page: u32, bbox: BoundingBox, table: Table) -> usize {
        self.push(page, bbox, ElementKind::Table(table))
    }

    /// Add a figure; returns its document-order index.
    pub fn add_figure(&mut self, page: u32, bbox: BoundingBox, alt_text: Option<String>) -> usize {
        self.push(page, bbox, ElementKind::Figure { alt_text })
    }

    fn push(&mut self, page: u32, bbox: BoundingBox, kind: ElementKind) -> usize {
        let index = self.elements.len();
        self.elements.push(Element {
            index,
            page,
            bbox,
            kind,
        });
        index
    }

    /// Finish construction and validate the store.
    pub fn build(self) -> Result<Document> {
        let doc = Document {
            pages: self.pages,
            elements: self.elements,
        };
        doc.validate()?;
        Ok(doc)
    }
}
