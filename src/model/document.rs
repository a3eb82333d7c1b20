//! Document-level types.

use super::{PageResult, SourceKind};
use crate::render::assemble_pages;
use serde::{Deserialize, Serialize};

/// Which text source a document ended up using.
///
/// Evaluated once per document by the density gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextSelection {
    /// The text layer was kept
    #[default]
    Extracted,
    /// Recognized text replaced the text layer on every page
    Ocr,
    /// Recognized text won, but the listed pages failed OCR and keep their text layer
    Hybrid {
        /// Pages (0-based) still using extracted text
        fallback_pages: Vec<u32>,
    },
}

/// A page whose OCR attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrFailure {
    /// Page index (0-based)
    pub page: u32,
    /// Failure description
    pub reason: String,
}

/// A reconstructed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Pages in source order
    pub pages: Vec<PageResult>,

    /// Text source decision
    pub selection: TextSelection,

    /// Whether the density gate triggered OCR
    pub ocr_attempted: bool,

    /// Pages whose OCR failed
    pub ocr_failures: Vec<OcrFailure>,
}

impl DocumentResult {
    /// Create a document from pages, keeping the text layer.
    pub fn new(pages: Vec<PageResult>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total characters reconstructed from the text layer.
    pub fn extracted_char_count(&self) -> u64 {
        self.pages.iter().map(|p| p.extracted_char_count).sum()
    }

    /// Number of pages using recognized text.
    pub fn ocr_page_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.source == SourceKind::Ocr)
            .count()
    }

    /// Chosen text of all pages, without diagnostics.
    pub fn content(&self) -> String {
        let texts: Vec<String> = self.pages.iter().map(PageResult::text).collect();
        assemble_pages(texts.iter().map(String::as_str))
    }

    /// Final document text, with OCR diagnostics in the failed pages' slots.
    pub fn text(&self) -> String {
        let texts: Vec<String> = self.pages.iter().map(PageResult::annotated_text).collect();
        assemble_pages(texts.iter().map(String::as_str))
    }

    /// Whether any page carries an OCR diagnostic.
    pub fn has_diagnostics(&self) -> bool {
        self.pages.iter().any(|p| p.diagnostic.is_some())
    }
}
