//! Element types.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, Table};

/// A single parsed element with its position in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Document-order index (unique, strictly increasing)
    pub index: usize,

    /// Page number (0-indexed)
    pub page: u32,

    /// Region the element occupies on its page
    pub bbox: BoundingBox,

    /// Variant-specific payload
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Get the element's text content, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::TextBlock { text } => Some(text),
            ElementKind::Header { text, .. } => Some(text),
            ElementKind::Figure { alt_text } => alt_text.as_deref(),
            ElementKind::Table(_) => None,
        }
    }

    /// Check if this element is a table.
    pub fn is_table(&self) -> bool {
        matches!(self.kind, ElementKind::Table(_))
    }

    /// Check if this element is a header.
    pub fn is_header(&self) -> bool {
        matches!(self.kind, ElementKind::Header { .. })
    }

    /// Check if this element is a text block.
    pub fn is_text_block(&self) -> bool {
        matches!(self.kind, ElementKind::TextBlock { .. })
    }

    /// Get the table payload, if this element is a table.
    pub fn as_table(&self) -> Option<&Table> {
        match &self.kind {
            ElementKind::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// The closed set of element variants a backend can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// A block of body text
    TextBlock {
        /// Text content
        text: String,
    },

    /// A section header
    Header {
        /// Header text
        text: String,
        /// Nesting level (1 = top level)
        level: u8,
    },

    /// A detected table
    Table(Table),

    /// A figure or image region
    Figure {
        /// Alternative text, when the backend provides one
        alt_text: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_element(index: usize, text: &str) -> Element {
        Element {
            index,
            page: 0,
            bbox: BoundingBox::new(0.0, 0.0, 100.0, 10.0),
            kind: ElementKind::TextBlock {
                text: text.to_string(),
            },
        }
    }

    #[test]
    fn test_element_text() {
        let el = text_element(0, "hello");
        assert_eq!(el.text(), Some("hello"));
        assert!(el.is_text_block());
        assert!(!el.is_table());
        assert!(el.as_table().is_none());
    }

    #[test]
    fn test_figure_text() {
        let el = Element {
            index: 3,
            page: 1,
            bbox: BoundingBox::new(0.0, 0.0, 50.0, 50.0),
            kind: ElementKind::Figure { alt_text: None },
        };
        assert_eq!(el.text(), None);
    }

    #[test]
    fn test_serde_tagging() {
        let el = text_element(2, "body");
        let json = serde_json::to_string(&el).unwrap();
        assert!(json.contains("\"type\":\"text_block\""));

        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index, 2);
        assert_eq!(back.text(), Some("body"));
    }
}
