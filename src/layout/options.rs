//! Layout reconstruction thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds for line clustering, composition and block segmentation.
///
/// Distances are expressed relative to page statistics: line heights for
/// vertical measures, average character width for horizontal ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Vertical tolerance for joining a line, as a fraction of average line height
    pub line_tolerance_ratio: f64,

    /// Horizontal gap (in average character widths) above which a tab is emitted
    pub column_gap_chars: f64,

    /// Horizontal gap (in average character widths) above which a space is emitted
    pub space_gap_chars: f64,

    /// Character width used when no fragment carries text
    pub fallback_char_width: f64,

    /// Line height used when the page has no fragments
    pub fallback_line_height: f64,

    /// Body height used when no font could be profiled
    pub fallback_body_height: f64,

    /// A line taller than `body height * ratio` may be a heading
    pub heading_height_ratio: f64,

    /// Headings have strictly fewer fragments than this
    pub heading_max_fragments: usize,

    /// Line gaps at or beyond this many average line heights are left out of the gap median
    pub gap_outlier_lines: f64,

    /// Median line gap, in average line heights, when no gap could be measured
    pub default_gap_lines: f64,

    /// A gap larger than `median gap * ratio` inserts a paragraph break
    pub paragraph_gap_ratio: f64,

    /// Prefix for heading lines
    pub heading_marker: String,

    /// Delimiter wrapped around bold text
    pub strong_marker: String,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line clustering tolerance ratio.
    pub fn with_line_tolerance_ratio(mut self, ratio: f64) -> Self {
        self.line_tolerance_ratio = ratio;
        self
    }

    /// Set the column break gap in character widths.
    pub fn with_column_gap_chars(mut self, chars: f64) -> Self {
        self.column_gap_chars = chars;
        self
    }

    /// Set the heading height ratio.
    pub fn with_heading_height_ratio(mut self, ratio: f64) -> Self {
        self.heading_height_ratio = ratio;
        self
    }

    /// Set the paragraph break ratio.
    pub fn with_paragraph_gap_ratio(mut self, ratio: f64) -> Self {
        self.paragraph_gap_ratio = ratio;
        self
    }

    /// Set the heading prefix.
    pub fn with_heading_marker(mut self, marker: impl Into<String>) -> Self {
        self.heading_marker = marker.into();
        self
    }

    /// Set the bold delimiter.
    pub fn with_strong_marker(mut self, marker: impl Into<String>) -> Self {
        self.strong_marker = marker.into();
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_tolerance_ratio: 0.4,
            column_gap_chars: 5.0,
            space_gap_chars: 0.5,
            fallback_char_width: 8.0,
            fallback_line_height: 12.0,
            fallback_body_height: 10.0,
            heading_height_ratio: 1.15,
            heading_max_fragments: 6,
            gap_outlier_lines: 3.0,
            default_gap_lines: 1.2,
            paragraph_gap_ratio: 1.5,
            heading_marker: "## ".to_string(),
            strong_marker: "**".to_string(),
        }
    }
}
