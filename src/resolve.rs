//! Table context resolution.
//!
//! Attaches candidate title/caption text to each table in a document using
//! spatial proximity and document flow order. Resolution is deterministic
//! and idempotent: re-running recomputes every title and overwrites the
//! previous result.

use rayon::prelude::*;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{Document, Element};
use crate::spatial::SpatialIndex;

/// Default caption label tokens.
const DEFAULT_LABELS: &[&str] = &["table", "exhibit"];

/// Options for table title resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Maximum vertical distance, in points, between a table and its
    /// caption. `None` uses 1/10 of the table's page height.
    pub distance_threshold: Option<f32>,

    /// Label tokens that mark caption-like text (matched case-insensitive
    /// at the start of the text). Leading numbering such as `3.` or `2.1:`
    /// is always accepted.
    pub caption_labels: Vec<String>,

    /// Whether to resolve tables in parallel
    pub parallel: bool,
}

impl ResolveOptions {
    /// Create new resolve options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an absolute caption distance threshold in points.
    pub fn with_distance_threshold(mut self, points: f32) -> Self {
        self.distance_threshold = Some(points);
        self
    }

    /// Replace the caption label tokens.
    pub fn with_caption_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.caption_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable parallel resolution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel resolution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            distance_threshold: None,
            caption_labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            parallel: true,
        }
    }
}

/// Compiled caption-likeness matcher.
///
/// Accepts text starting with a configured label token ("Table", "Exhibit")
/// or a numbering pattern ("3.", "2.1:"), case-insensitive, after NFKC
/// normalization.
pub struct CaptionMatcher {
    label_pattern: Option<Regex>,
    numbering_pattern: Regex,
}

impl CaptionMatcher {
    /// Compile a matcher from resolve options.
    pub fn from_options(options: &ResolveOptions) -> Result<Self> {
        let label_pattern = if options.caption_labels.is_empty() {
            None
        } else {
            let alternatives = options
                .caption_labels
                .iter()
                .map(|l| regex::escape(l))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)^\s*(?:{})\b", alternatives);
            Some(Regex::new(&pattern).map_err(|e| {
                Error::InvalidOption(format!("caption labels produce an invalid pattern: {}", e))
            })?)
        };

        let numbering_pattern = Regex::new(r"^\s*\d+(?:\.\d+)*\s*[.:)\-]").expect("static pattern");

        Ok(Self {
            label_pattern,
            numbering_pattern,
        })
    }

    /// Check whether text looks like a table caption.
    pub fn is_caption(&self, text: &str) -> bool {
        let normalized: String = text.nfkc().collect();
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            return false;
        }
        if let Some(ref labels) = self.label_pattern {
            if labels.is_match(trimmed) {
                return true;
            }
        }
        self.numbering_pattern.is_match(trimmed)
    }
}

/// Resolve a title for every table in the document.
///
/// For each table, in order:
/// 1. the nearest text block or header strictly above it on the same page,
///    within the distance threshold, if its text is caption-like;
/// 2. otherwise the nearest header earlier in document order (possibly on a
///    prior page), as section context;
/// 3. otherwise the title is left unset.
///
/// Writes the result into each table's `title` field and returns the number
/// of tables that received one. Errors on one document never affect others;
/// this function touches only the document it is given.
pub fn resolve_titles(doc: &mut Document, options: &ResolveOptions) -> Result<usize> {
    let matcher = CaptionMatcher::from_options(options)?;
    let table_indices = doc.table_indices();
    if table_indices.is_empty() {
        return Ok(0);
    }

    let assignments: Vec<(usize, Option<usize>)> = {
        let doc_ref: &Document = doc;
        let index = SpatialIndex::new(doc_ref);
        let resolve_one = |&table_index: &usize| {
            (
                table_index,
                resolve_table(doc_ref, &index, &matcher, options, table_index),
            )
        };

        if options.parallel {
            table_indices.par_iter().map(resolve_one).collect()
        } else {
            table_indices.iter().map(resolve_one).collect()
        }
    };

    let mut resolved = 0;
    for (table_index, title) in assignments {
        if let Some(table) = doc.table_mut(table_index) {
            table.title = title;
            if title.is_some() {
                resolved += 1;
            }
        }
    }

    log::debug!(
        "resolved titles for {}/{} tables",
        resolved,
        table_indices.len()
    );
    Ok(resolved)
}

fn resolve_table(
    doc: &Document,
    index: &SpatialIndex<'_>,
    matcher: &CaptionMatcher,
    options: &ResolveOptions,
    table_index: usize,
) -> Option<usize> {
    let el = doc.by_index(table_index)?;
    let threshold = options.distance_threshold.unwrap_or_else(|| {
        doc.page_info(el.page)
            .map(|p| p.height / 10.0)
            .unwrap_or(79.2)
    });

    // Step 1: nearest text block or header strictly above, same page.
    let nearby = index.nearest_above_where(table_index, threshold, |cand: &Element| {
        cand.is_text_block() || cand.is_header()
    });

    if let Some(cand) = nearby {
        if matcher.is_caption(cand.text().unwrap_or_default()) {
            log::debug!(
                "table {}: caption accepted from element {} ({:?})",
                table_index,
                cand.index,
                cand.text()
            );
            return Some(cand.index);
        }
    }

    // Step 2: fall back to the nearest header earlier in document order,
    // treated as section context.
    let table_pos = doc
        .elements()
        .partition_point(|cand| cand.index < table_index);
    let section = doc.elements()[..table_pos]
        .iter()
        .rev()
        .find(|cand| cand.is_header());

    match section {
        Some(header) => {
            log::debug!(
                "table {}: no caption in range, using section header {}",
                table_index,
                header.index
            );
            Some(header.index)
        }
        None => {
            log::debug!("table {}: no title candidate found", table_index);
            None
        }
    }
}
