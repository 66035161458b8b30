//! Structured-records output for downstream tabular analysis.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Document, Record};

use super::markdown::title_text;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Flattened records for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRecords {
    /// Document-order index of the table element
    pub table_index: usize,

    /// Resolved title text, when the context resolver attached one
    pub title: Option<String>,

    /// Grid row count
    pub rows: u32,

    /// Grid column count
    pub columns: u32,

    /// One record per grid position, row-major
    pub records: Vec<Record>,
}

/// Flattened records for every table in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecords {
    /// Per-table records, in document order
    pub tables: Vec<TableRecords>,
}

impl DocumentRecords {
    /// Total number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Check if no tables were present.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Extract flat records from every table in the document.
pub fn to_records(doc: &Document) -> Result<DocumentRecords> {
    let mut tables = Vec::new();
    for el in doc.tables() {
        let Some(table) = el.as_table() else {
            continue;
        };
        tables.push(TableRecords {
            table_index: el.index,
            title: title_text(doc, table).map(str::to_string),
            rows: table.row_count,
            columns: table.column_count,
            records: table.flat_records()?,
        });
    }
    Ok(DocumentRecords { tables })
}

/// Serialize document records to JSON.
pub fn records_to_json(records: &DocumentRecords, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(records),
        JsonFormat::Compact => serde_json::to_string(records),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Cell, DocumentBuilder, PageInfo, Table};

    fn bbox(y0: f32, y1: f32) -> BoundingBox {
        BoundingBox::new(50.0, y0, 500.0, y1)
    }

    fn doc_with_table() -> Document {
        let mut builder = DocumentBuilder::new().page(PageInfo::letter(0));
        let caption = builder.add_text_block(0, bbox(40.0, 60.0), "Table 2: Counts");
        let table = Table::new(
            2,
            2,
            vec![
                Cell::text(0, 0, "k"),
                Cell::text(0, 1, "v"),
                Cell::text(1, 0, "a"),
                Cell::text(1, 1, "1"),
            ],
        )
        .unwrap();
        let t = builder.add_table(0, bbox(80.0, 160.0), table);
        let mut doc = builder.build().unwrap();
        doc.table_mut(t).unwrap().title = Some(caption);
        doc
    }

    #[test]
    fn test_to_records() {
        let records = to_records(&doc_with_table()).unwrap();

        assert_eq!(records.table_count(), 1);
        let table = &records.tables[0];
        assert_eq!(table.title.as_deref(), Some("Table 2: Counts"));
        assert_eq!(table.records.len(), 4);
        assert_eq!(table.records[3].value, "1");
    }

    #[test]
    fn test_no_tables() {
        let mut builder = DocumentBuilder::new().page(PageInfo::letter(0));
        builder.add_text_block(0, bbox(40.0, 60.0), "prose only");
        let doc = builder.build().unwrap();

        let records = to_records(&doc).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_to_json_formats() {
        let records = to_records(&doc_with_table()).unwrap();

        let pretty = records_to_json(&records, JsonFormat::Pretty).unwrap();
        assert!(pretty.contains('\n'));

        let compact = records_to_json(&records, JsonFormat::Compact).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"table_index\":1"));
    }
}
