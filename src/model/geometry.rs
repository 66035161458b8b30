//! Page geometry types.

use serde::{Deserialize, Serialize};

/// A rectangular region on a page, in page coordinates.
///
/// Top-left origin: `y0` is the top edge, `y1` the bottom edge, and larger
/// `y` values are lower on the page. Invariants: `x0 <= x1`, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Get the width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Get the height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Check that the box is well-formed (finite, non-inverted edges).
    pub fn is_valid(&self) -> bool {
        self.x0.is_finite()
            && self.y0.is_finite()
            && self.x1.is_finite()
            && self.y1.is_finite()
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }

    /// Check whether this box lies entirely above `other` (its bottom edge
    /// at or above the other's top edge).
    pub fn is_above(&self, other: &BoundingBox) -> bool {
        self.y1 <= other.y0
    }

    /// Vertical gap between this box's bottom edge and the top edge of a
    /// box below it. Negative if the boxes overlap vertically.
    pub fn gap_to_below(&self, below: &BoundingBox) -> f32 {
        below.y0 - self.y1
    }
}

/// Geometry of one page in the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number (0-indexed, matching element page references)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,
}

impl PageInfo {
    /// Create a new page record.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
        }
    }

    /// Standard US Letter page (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Standard A4 page (210 x 297 mm).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.0, 842.0)
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}
