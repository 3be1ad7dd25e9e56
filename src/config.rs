//! Page layout configuration.
//!
//! The defaults describe one A4 page of Helvetica text and are the values
//! the emitted byte layout is pinned to.

/// Text layout settings used when building a page's content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Font resource name referenced by `Tf` (key in the page's /Font dict).
    pub font_resource: String,

    /// Font size in points.
    pub font_size: f32,

    /// Text leading (distance between baselines) set with `TL`.
    pub leading: f32,

    /// Starting text position (x, y) in page space.
    pub origin: (f32, f32),

    /// Maximum characters per wrapped segment.
    pub wrap_width: usize,

    /// Maximum number of segments shown on the page.
    pub max_lines: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            font_resource: "F1".to_string(),
            font_size: 12.0,
            leading: 14.0,
            origin: (50.0, 800.0),
            wrap_width: 95,
            max_lines: 55,
        }
    }

    /// Set the wrap width in characters.
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Set the maximum number of lines shown.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set font size and leading.
    pub fn with_font_size(mut self, size: f32, leading: f32) -> Self {
        self.font_size = size;
        self.leading = leading;
        self
    }

    /// Set the starting text position.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }
}
