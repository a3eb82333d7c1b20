//! Composing a line's fragments into text.

use crate::model::{Line, TextFragment};

use super::LayoutOptions;

/// Font name fragments that mark a bold or heavy weight.
const BOLD_FONT_HINTS: &[&str] = &[
    "bold",
    "demi",
    "heavy",
    "black",
    "book",
    "medium",
    "semibold",
    "extrabold",
    "ultrabold",
    "extra-bold",
    "semi-bold",
];

/// Check whether a font name indicates emphasis.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    BOLD_FONT_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Separator inserted between two adjacent fragments of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// The fragments touch
    None,
    /// A word gap
    Space,
    /// A column or field gap
    Tab,
}

impl Separator {
    fn as_str(self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Space => " ",
            Separator::Tab => "\t",
        }
    }
}

/// Turns a line of fragments into text with separators and emphasis.
#[derive(Debug, Clone)]
pub struct LineComposer<'a> {
    avg_char_width: f64,
    options: &'a LayoutOptions,
}

impl<'a> LineComposer<'a> {
    /// Create a composer for a page with the given average character width.
    pub fn new(avg_char_width: f64, options: &'a LayoutOptions) -> Self {
        Self {
            avg_char_width,
            options,
        }
    }

    /// Classify the horizontal gap between two fragments.
    pub fn separator(&self, prev: &TextFragment, next: &TextFragment) -> Separator {
        let gap = next.x - prev.right();
        if gap > self.avg_char_width * self.options.column_gap_chars {
            Separator::Tab
        } else if gap > self.avg_char_width * self.options.space_gap_chars {
            Separator::Space
        } else {
            Separator::None
        }
    }

    /// Compose a line's text. Members must already be ordered left-to-right.
    pub fn compose(&self, line: &Line) -> String {
        let mut text = String::new();
        let mut prev: Option<&TextFragment> = None;

        for fragment in &line.members {
            if let Some(prev) = prev {
                text.push_str(self.separator(prev, fragment).as_str());
            }
            self.push_fragment(&mut text, fragment);
            prev = Some(fragment);
        }

        text.trim().to_string()
    }

    /// Append a fragment, wrapping bold text in the strong marker while
    /// keeping its surrounding whitespace outside the marker.
    fn push_fragment(&self, out: &mut String, fragment: &TextFragment) {
        let raw = fragment.text.as_str();
        let core = raw.trim();
        if core.is_empty() || !is_bold_font(&fragment.font_name) {
            out.push_str(raw);
            return;
        }

        let leading = &raw[..raw.len() - raw.trim_start().len()];
        let trailing = &raw[raw.trim_end().len()..];
        let marker = self.options.strong_marker.as_str();
        out.push_str(leading);
        out.push_str(marker);
        out.push_str(core);
        out.push_str(marker);
        out.push_str(trailing);
    }
}
