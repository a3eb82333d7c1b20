//! Fragment source abstraction layer.
//!
//! Provides a trait-based interface for the page content reader, isolating
//! whatever PDF library produces fragments from the layout logic.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::TextFragment;

/// Supplies positioned text fragments page by page.
///
/// Pages are 0-indexed. The extractor asks for each page exactly once, in
/// increasing page order.
pub trait FragmentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// All text fragments of one page, in content-stream order.
    fn fragments_for_page(&self, page: u32) -> Result<Vec<TextFragment>>;
}

/// A fragment source backed by in-memory pages.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<TextFragment>>,
}

impl MemorySource {
    /// Create a source from per-page fragment lists.
    pub fn new(pages: Vec<Vec<TextFragment>>) -> Self {
        Self { pages }
    }

    /// Load a JSON dump: an array of pages, each an array of fragments.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a JSON dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    /// Load a JSON dump from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Append a page.
    pub fn push_page(&mut self, fragments: Vec<TextFragment>) {
        self.pages.push(fragments);
    }
}

impl FragmentSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn fragments_for_page(&self, page: u32) -> Result<Vec<TextFragment>> {
        self.pages
            .get(page as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}

impl From<Vec<Vec<TextFragment>>> for MemorySource {
    fn from(pages: Vec<Vec<TextFragment>>) -> Self {
        Self::new(pages)
    }
}
