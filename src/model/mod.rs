//! Document model types.
//!
//! This module defines the intermediate representation (IR) that bridges
//! a document-AI parsing backend and content rendering: an ordered element
//! store with positional metadata, and a validated table model.

mod document;
mod element;
mod geometry;
mod table;

pub use document::{Document, DocumentBuilder};
pub use element::{Element, ElementKind};
pub use geometry::{BoundingBox, PageInfo};
pub use table::{Cell, CellKind, Grid, Record, Table};
