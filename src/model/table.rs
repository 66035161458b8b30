//! Table types.
//!
//! A [`Table`] is the structured payload of a table element: a validated
//! grid of [`Cell`]s with row/column spans, plus an optional back-reference
//! to the element resolved as its title.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A table structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Number of rows in the grid (>= 1)
    pub row_count: u32,

    /// Number of columns in the grid (>= 1)
    pub column_count: u32,

    /// Cells, in detection order
    pub cells: Vec<Cell>,

    /// Document-order index of the element resolved as this table's title
    pub title: Option<usize>,
}

impl Table {
    /// Create a table, validating the span invariant.
    ///
    /// Fails with [`Error::Structural`] if the grid dimensions are zero, a
    /// cell lies outside the grid, or two cells claim the same grid
    /// position once spans are expanded. Grid positions covered by no cell
    /// are allowed and read as empty content.
    pub fn new(row_count: u32, column_count: u32, cells: Vec<Cell>) -> Result<Self> {
        if row_count == 0 || column_count == 0 {
            return Err(Error::Structural(format!(
                "table grid must be at least 1x1, got {}x{}",
                row_count, column_count
            )));
        }

        let table = Self {
            row_count,
            column_count,
            cells,
            title: None,
        };
        // Occupancy check doubles as bounds validation.
        table.occupancy()?;
        Ok(table)
    }

    /// Get the number of rows.
    pub fn rows(&self) -> u32 {
        self.row_count
    }

    /// Get the number of columns.
    pub fn columns(&self) -> u32 {
        self.column_count
    }

    /// Check if any cell spans multiple rows or columns.
    pub fn has_merged_cells(&self) -> bool {
        self.cells.iter().any(|c| c.is_merged())
    }

    /// Row-major 2D view of the cells, respecting spans.
    pub fn grid(&self) -> Result<Grid<'_>> {
        Ok(Grid {
            occupancy: self.occupancy()?,
            row_count: self.row_count as usize,
            column_count: self.column_count as usize,
            cells: &self.cells,
        })
    }

    /// Flatten the table into one record per grid position.
    ///
    /// Spanned cells repeat their value at every position they cover;
    /// unclaimed positions yield an empty value.
    pub fn flat_records(&self) -> Result<Vec<Record>> {
        let grid = self.grid()?;
        let mut records = Vec::with_capacity(grid.row_count * grid.column_count);
        for row in 0..self.row_count {
            for column in 0..self.column_count {
                let value = grid
                    .cell_at(row, column)
                    .map(|c| c.text.clone())
                    .unwrap_or_default();
                records.push(Record { row, column, value });
            }
        }
        Ok(records)
    }

    /// Get plain text representation, one tab-joined line per row.
    pub fn plain_text(&self) -> String {
        let Ok(grid) = self.grid() else {
            return String::new();
        };
        (0..self.row_count)
            .map(|row| {
                (0..self.column_count)
                    .map(|col| grid.text_at(row, col))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Expand spans into a row-major occupancy map of cell indices.
    fn occupancy(&self) -> Result<Vec<Option<usize>>> {
        let rows = self.row_count as usize;
        let columns = self.column_count as usize;
        let mut occupancy: Vec<Option<usize>> = vec![None; rows * columns];

        for (cell_idx, cell) in self.cells.iter().enumerate() {
            if cell.row_span == 0 || cell.col_span == 0 {
                return Err(Error::Structural(format!(
                    "cell at ({}, {}) has zero span",
                    cell.row, cell.column
                )));
            }
            let row_end = cell.row as usize + cell.row_span as usize;
            let col_end = cell.column as usize + cell.col_span as usize;
            if row_end > rows || col_end > columns {
                return Err(Error::Structural(format!(
                    "cell at ({}, {}) with span {}x{} exceeds the {}x{} grid",
                    cell.row, cell.column, cell.row_span, cell.col_span, rows, columns
                )));
            }

            for r in cell.row as usize..row_end {
                for c in cell.column as usize..col_end {
                    let slot = &mut occupancy[r * columns + c];
                    if slot.is_some() {
                        return Err(Error::Structural(format!(
                            "cell at ({}, {}) overlaps an occupied grid position ({}, {})",
                            cell.row, cell.column, r, c
                        )));
                    }
                    *slot = Some(cell_idx);
                }
            }
        }

        Ok(occupancy)
    }
}

/// Row-major 2D view of a table's cells with spans expanded.
#[derive(Debug)]
pub struct Grid<'a> {
    occupancy: Vec<Option<usize>>,
    row_count: usize,
    column_count: usize,
    cells: &'a [Cell],
}

impl<'a> Grid<'a> {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// The cell covering a grid position, or `None` if the position is
    /// unclaimed or out of range.
    pub fn cell_at(&self, row: u32, column: u32) -> Option<&'a Cell> {
        let (row, column) = (row as usize, column as usize);
        if row >= self.row_count || column >= self.column_count {
            return None;
        }
        self.occupancy[row * self.column_count + column].map(|i| &self.cells[i])
    }

    /// Text at a grid position; empty for unclaimed positions.
    pub fn text_at(&self, row: u32, column: u32) -> &'a str {
        self.cell_at(row, column)
            .map(|c| c.text.as_str())
            .unwrap_or("")
    }

    /// Whether a grid position is the anchor (top-left) of its cell rather
    /// than a spanned continuation.
    pub fn is_anchor(&self, row: u32, column: u32) -> bool {
        self.cell_at(row, column)
            .map(|c| c.row == row && c.column == column)
            .unwrap_or(false)
    }
}

/// A single flattened table value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Grid row
    pub row: u32,
    /// Grid column
    pub column: u32,
    /// Cell text (empty for unclaimed positions)
    pub value: String,
}

/// A table cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Anchor row index (0-based, within table bounds)
    pub row: u32,

    /// Anchor column index (0-based, within table bounds)
    pub column: u32,

    /// Number of rows this cell spans (>= 1)
    pub row_span: u32,

    /// Number of columns this cell spans (>= 1)
    pub col_span: u32,

    /// Cell content
    pub text: String,

    /// Content classification
    pub kind: CellKind,
}

impl Cell {
    /// Create a cell with classified text content.
    pub fn text(row: u32, column: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = CellKind::classify(&text);
        Self {
            row,
            column,
            row_span: 1,
            col_span: 1,
            text,
            kind,
        }
    }

    /// Create an empty cell.
    pub fn empty(row: u32, column: u32) -> Self {
        Self {
            row,
            column,
            row_span: 1,
            col_span: 1,
            text: String::new(),
            kind: CellKind::Empty,
        }
    }

    /// Set the column span and return self.
    pub fn col_span(mut self, span: u32) -> Self {
        self.col_span = span;
        self
    }

    /// Set the row span and return self.
    pub fn row_span(mut self, span: u32) -> Self {
        self.row_span = span;
        self
    }

    /// Check if the cell has no content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

/// Classification of a cell's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Numeric value (plain, thousands-separated, percentage, currency)
    Number,
    /// Calendar date
    Date,
    /// Free text
    #[default]
    TextLabel,
    /// No content
    Empty,
}

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\(?[+-]?[$€£¥₩]?\s?\d{1,3}(?:,\d{3})*(?:\.\d+)?%?\)?$").unwrap()
    })
}

/// Date formats commonly seen in extracted report tables.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

impl CellKind {
    /// Classify a cell's text content.
    pub fn classify(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return CellKind::Empty;
        }
        if number_pattern().is_match(trimmed) {
            return CellKind::Number;
        }
        if DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
        {
            return CellKind::Date;
        }
        CellKind::TextLabel
    }
}
