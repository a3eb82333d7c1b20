//! Positioned text fragments as delivered by a page content reader.

use serde::{Deserialize, Deserializer, Serialize};

/// One run of text with a fixed font and position.
///
/// Coordinates are in PDF user space: origin at the bottom-left of the page,
/// `y` growing upward, `y` being the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content (may be empty)
    #[serde(alias = "str")]
    pub text: String,
    /// X position (left edge)
    pub x: f64,
    /// Y position (baseline)
    pub y: f64,
    /// Rendered width of the text, never negative
    #[serde(default, deserialize_with = "non_negative")]
    pub width: f64,
    /// Rendered height of the text, never negative
    #[serde(default, deserialize_with = "non_negative")]
    pub height: f64,
    /// Font identifier (e.g., "Helvetica-Bold", "g_d0_f2")
    #[serde(default, alias = "fontName")]
    pub font_name: String,
}

impl TextFragment {
    /// Create a new fragment. Negative extents are clamped to zero.
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            font_name: font_name.into(),
        }
    }

    /// Right edge of the fragment.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Whether the fragment carries no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the position can be placed on a page.
    pub fn has_finite_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whether width and height are usable in page statistics.
    pub fn has_finite_extent(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Extents from dumps get the same clamping as [`TextFragment::new`].
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(f64::deserialize(deserializer)?.max(0.0))
}
