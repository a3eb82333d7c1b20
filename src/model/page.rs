//! Page-level types.

use super::ComposedLine;
use crate::render::collapse_blank_lines;
use serde::{Deserialize, Serialize};

/// Where a page's final text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Reconstructed from the page's text layer
    #[default]
    ExtractedText,
    /// Recognized from a rendered image of the page
    Ocr,
}

/// An entry in a page's reconstructed reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEntry {
    /// A composed line of text
    Line(ComposedLine),
    /// A paragraph break (blank line)
    Break,
}

impl PageEntry {
    /// Rendered text of the entry; empty for breaks.
    pub fn rendered(&self) -> &str {
        match self {
            PageEntry::Line(line) => &line.rendered,
            PageEntry::Break => "",
        }
    }

    /// Check if this entry is a paragraph break.
    pub fn is_break(&self) -> bool {
        matches!(self, PageEntry::Break)
    }
}

/// The reconstructed content of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// Page index (0-based, in source order)
    pub number: u32,

    /// Lines and paragraph breaks in reading order
    pub entries: Vec<PageEntry>,

    /// Characters in the text reconstructed from the text layer
    pub extracted_char_count: u64,

    /// Which text source the page uses
    pub source: SourceKind,

    /// Recognized text, present when `source` is [`SourceKind::Ocr`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_text: Option<String>,

    /// In-band diagnostic written after the page text when its OCR failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl PageResult {
    /// Create a page result from reconstructed entries.
    pub fn new(number: u32, entries: Vec<PageEntry>) -> Self {
        let mut page = Self {
            number,
            entries,
            extracted_char_count: 0,
            source: SourceKind::ExtractedText,
            ocr_text: None,
            diagnostic: None,
        };
        page.extracted_char_count = page.extracted_text().chars().count() as u64;
        page
    }

    /// A page with no content.
    pub fn empty(number: u32) -> Self {
        Self::new(number, Vec::new())
    }

    /// Text reconstructed from the text layer.
    pub fn extracted_text(&self) -> String {
        let joined = self
            .entries
            .iter()
            .map(PageEntry::rendered)
            .collect::<Vec<_>>()
            .join("\n");
        collapse_blank_lines(&joined)
    }

    /// Final text of the page, honoring its source.
    pub fn text(&self) -> String {
        match (&self.source, &self.ocr_text) {
            (SourceKind::Ocr, Some(text)) => text.clone(),
            _ => self.extracted_text(),
        }
    }

    /// Page text followed by its diagnostic, if any.
    pub fn annotated_text(&self) -> String {
        let text = self.text();
        match &self.diagnostic {
            Some(marker) if text.is_empty() => marker.clone(),
            Some(marker) => format!("{}\n{}", text, marker),
            None => text,
        }
    }

    /// Record a failed OCR attempt with the marker to show in place.
    pub fn mark_ocr_failed(&mut self, marker: &str) {
        self.diagnostic = Some(marker.to_string());
    }

    /// Switch the page to recognized text.
    pub fn use_ocr_text(&mut self, text: String) {
        self.source = SourceKind::Ocr;
        self.ocr_text = Some(text);
    }

    /// Iterate over composed lines, skipping breaks.
    pub fn lines(&self) -> impl Iterator<Item = &ComposedLine> {
        self.entries.iter().filter_map(|entry| match entry {
            PageEntry::Line(line) => Some(line),
            PageEntry::Break => None,
        })
    }

    /// Check if the page has no text-layer content.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
