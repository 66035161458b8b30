//! Rendering options and configuration.

/// Output formats supported by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// GitHub-flavored Markdown
    #[default]
    Markdown,
    /// HTML fragment
    Html,
    /// Flat per-table records as JSON
    Records,
}

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Attach resolved titles to their tables (and skip them at their flow
    /// position, so captions are not emitted twice)
    pub include_captions: bool,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Escape characters with markup meaning in the output format
    pub escape_special_chars: bool,

    /// Placeholder for grid positions covered by no cell
    pub empty_cell: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable caption attachment.
    pub fn with_captions(mut self, include: bool) -> Self {
        self.include_captions = include;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable special character escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the placeholder for unclaimed grid positions.
    pub fn with_empty_cell(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_cell = placeholder.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_captions: true,
            max_heading_level: 6,
            escape_special_chars: true,
            empty_cell: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_captions(false)
            .with_max_heading(3)
            .with_empty_cell("-");

        assert!(!options.include_captions);
        assert_eq!(options.max_heading_level, 3);
        assert_eq!(options.empty_cell, "-");
    }

    #[test]
    fn test_max_heading_clamped() {
        assert_eq!(RenderOptions::new().with_max_heading(0).max_heading_level, 1);
        assert_eq!(RenderOptions::new().with_max_heading(9).max_heading_level, 6);
    }
}
