//! Extraction statistics for reconstructed documents.

use crate::model::{DocumentResult, PageResult, SourceKind};
use serde::{Deserialize, Serialize};

/// Statistics collected from a reconstructed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of pages processed
    pub page_count: u32,

    /// Composed lines from the text layer
    pub line_count: u32,

    /// Lines classified as headings
    pub heading_count: u32,

    /// Paragraph breaks inserted between lines
    pub paragraph_break_count: u32,

    /// Pages whose final text came from OCR
    pub ocr_page_count: u32,

    /// Pages whose OCR attempt failed
    pub ocr_failure_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a whole document.
    pub fn from_document(doc: &DocumentResult) -> Self {
        let mut stats = Self::new();
        for page in &doc.pages {
            stats.add_page(page);
        }
        stats.ocr_failure_count = doc.ocr_failures.len() as u32;
        stats
    }

    /// Add one page's counts.
    pub fn add_page(&mut self, page: &PageResult) {
        self.page_count += 1;
        for entry in &page.entries {
            if entry.is_break() {
                self.paragraph_break_count += 1;
            }
        }
        for line in page.lines() {
            self.line_count += 1;
            if line.is_heading {
                self.heading_count += 1;
            }
        }
        if page.source == SourceKind::Ocr {
            self.ocr_page_count += 1;
        }
        self.count_text(&page.text());
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
