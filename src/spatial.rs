//! Spatial proximity index over a document's elements.
//!
//! Answers "what lies immediately above/below this element on its page"
//! queries for the context resolver. Built once from an immutable
//! [`Document`]; per-page element positions are kept in contiguous sorted
//! arrays and looked up by binary search plus a bounded linear scan, so the
//! index is cheap to build and safe for unsynchronized concurrent reads.

use std::collections::HashMap;

use crate::model::{Document, Element};

/// Per-page sorted views of the element store.
#[derive(Debug, Default)]
struct PageIndex {
    /// Store positions sorted by bottom edge (`y1`), then document order.
    by_bottom: Vec<usize>,
    /// Store positions sorted by top edge (`y0`), then document order.
    by_top: Vec<usize>,
}

/// Proximity index over the elements of one document.
pub struct SpatialIndex<'a> {
    doc: &'a Document,
    pages: HashMap<u32, PageIndex>,
}

impl<'a> SpatialIndex<'a> {
    /// Build the index by grouping elements per page and sorting by
    /// vertical position.
    pub fn new(doc: &'a Document) -> Self {
        let mut pages: HashMap<u32, PageIndex> = HashMap::new();

        for (pos, el) in doc.elements().iter().enumerate() {
            let page = pages.entry(el.page).or_default();
            page.by_bottom.push(pos);
            page.by_top.push(pos);
        }

        let elements = doc.elements();
        for page in pages.values_mut() {
            page.by_bottom.sort_by(|&a, &b| {
                elements[a]
                    .bbox
                    .y1
                    .partial_cmp(&elements[b].bbox.y1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(elements[a].index.cmp(&elements[b].index))
            });
            page.by_top.sort_by(|&a, &b| {
                elements[a]
                    .bbox
                    .y0
                    .partial_cmp(&elements[b].bbox.y0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(elements[a].index.cmp(&elements[b].index))
            });
        }

        log::debug!(
            "spatial index built: {} elements across {} pages",
            doc.element_count(),
            pages.len()
        );

        Self { doc, pages }
    }

    /// Nearest element strictly above the given element on the same page,
    /// within `max_distance` points. `None` when nothing is in range.
    pub fn nearest_above(&self, index: usize, max_distance: f32) -> Option<&'a Element> {
        self.nearest_above_where(index, max_distance, |_| true)
    }

    /// Nearest element strictly below the given element on the same page,
    /// within `max_distance` points.
    pub fn nearest_below(&self, index: usize, max_distance: f32) -> Option<&'a Element> {
        self.nearest_below_where(index, max_distance, |_| true)
    }

    /// Like [`nearest_above`](Self::nearest_above), considering only
    /// elements accepted by `filter`.
    pub fn nearest_above_where(
        &self,
        index: usize,
        max_distance: f32,
        filter: impl Fn(&Element) -> bool,
    ) -> Option<&'a Element> {
        let el = self.doc.by_index(index)?;
        let page = self.pages.get(&el.page)?;
        let elements = self.doc.elements();

        // First position whose bottom edge extends past the query's top
        // edge; everything before it is strictly above.
        let cut = page
            .by_bottom
            .partition_point(|&pos| elements[pos].bbox.y1 <= el.bbox.y0);

        let mut best: Option<(&'a Element, f32)> = None;
        for &pos in page.by_bottom[..cut].iter().rev() {
            let cand = &elements[pos];
            let distance = cand.bbox.gap_to_below(&el.bbox);
            if distance > max_distance {
                // Sorted by bottom edge: every remaining candidate is
                // farther away.
                break;
            }
            if cand.index == el.index || !filter(cand) {
                continue;
            }
            match best {
                None => best = Some((cand, distance)),
                Some((held, held_distance)) => {
                    if distance == held_distance {
                        // Equidistant: prefer the earlier document order.
                        if cand.index < held.index {
                            best = Some((cand, distance));
                        }
                    } else {
                        break;
                    }
                }
            }
        }
        best.map(|(el, _)| el)
    }

    /// Like [`nearest_below`](Self::nearest_below), considering only
    /// elements accepted by `filter`.
    pub fn nearest_below_where(
        &self,
        index: usize,
        max_distance: f32,
        filter: impl Fn(&Element) -> bool,
    ) -> Option<&'a Element> {
        let el = self.doc.by_index(index)?;
        let page = self.pages.get(&el.page)?;
        let elements = self.doc.elements();

        // First position whose top edge is at or past the query's bottom
        // edge; it and everything after are strictly below.
        let start = page
            .by_top
            .partition_point(|&pos| elements[pos].bbox.y0 < el.bbox.y1);

        let mut best: Option<(&'a Element, f32)> = None;
        for &pos in &page.by_top[start..] {
            let cand = &elements[pos];
            let distance = el.bbox.gap_to_below(&cand.bbox);
            if distance > max_distance {
                break;
            }
            if cand.index == el.index || !filter(cand) {
                continue;
            }
            match best {
                None => best = Some((cand, distance)),
                Some((held, held_distance)) => {
                    if distance == held_distance {
                        if cand.index < held.index {
                            best = Some((cand, distance));
                        }
                    } else {
                        break;
                    }
                }
            }
        }
        best.map(|(el, _)| el)
    }
}
