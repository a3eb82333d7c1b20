//! # relayout
//!
//! Reading-order text reconstruction for PDF pages.
//!
//! A PDF content reader yields unordered, absolutely-positioned text
//! fragments. This library turns them into linear, structured text:
//! lines in top-to-bottom order, `## ` headings, `**bold**` emphasis, tabs
//! for column gaps and blank lines between paragraphs and pages. When a
//! document's text layer is too sparse to be genuine (a scanned document),
//! it falls back to a caller-supplied OCR engine.
//!
//! ## Quick Start
//!
//! ```
//! use relayout::{reconstruct_page, TextFragment};
//!
//! let fragments = vec![
//!     TextFragment::new("Experience", 0.0, 700.0, 80.0, 14.0, "Helvetica-Bold"),
//!     TextFragment::new("Software Engineer", 0.0, 680.0, 120.0, 10.0, "Helvetica"),
//!     TextFragment::new("Acme Corp", 0.0, 668.0, 63.0, 10.0, "Helvetica"),
//! ];
//! let text = reconstruct_page(fragments);
//! assert!(text.starts_with("## **Experience**"));
//! ```
//!
//! ## Documents and OCR
//!
//! ```no_run
//! use std::sync::Arc;
//! use relayout::{DocumentExtractor, MemorySource, OcrEngine, PageRasterizer};
//!
//! # fn run(rasterizer: Arc<dyn PageRasterizer>, engine: Arc<dyn OcrEngine>) -> relayout::Result<()> {
//! let source = MemorySource::from_path("fragments.json")?;
//! let text = DocumentExtractor::new()
//!     .with_ocr(rasterizer, engine)
//!     .extract_text(&source)?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Font statistics**: body font by frequency, heading detection by size
//! - **Line clustering**: deterministic first-match baseline grouping
//! - **Column awareness**: large horizontal gaps become tabs
//! - **Paragraphs**: breaks inferred from the median line spacing
//! - **OCR fallback**: density gate, per-page timeouts, in-band diagnostics
//! - **Parallel processing**: uses Rayon for multi-page documents

pub mod error;
pub mod extract;
pub mod layout;
pub mod model;
pub mod ocr;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{DocumentExtractor, ExtractOptions};
pub use layout::{LayoutAnalyzer, LayoutOptions};
pub use model::{
    ComposedLine, DocumentResult, Line, OcrFailure, PageEntry, PageResult, SourceKind,
    TextFragment, TextSelection,
};
pub use ocr::{CancellationToken, OcrEngine, OcrOptions, PageRasterizer};
pub use render::{to_json, ExtractionStats, JsonFormat};
pub use source::{FragmentSource, MemorySource};

/// Reconstruct the text of a single page with default options.
///
/// An empty page yields an empty string.
pub fn reconstruct_page(fragments: Vec<TextFragment>) -> String {
    LayoutAnalyzer::default().page_text(fragments)
}

/// Reconstruct a document's text with default options and no OCR.
///
/// # Example
///
/// ```
/// use relayout::{extract_text, MemorySource, TextFragment};
///
/// let source = MemorySource::new(vec![vec![
///     TextFragment::new("A page with enough text", 0.0, 700.0, 140.0, 10.0, "F1"),
///     TextFragment::new("to pass the density gate on its own.", 0.0, 688.0, 210.0, 10.0, "F1"),
/// ]]);
/// let text = extract_text(&source)?;
/// assert_eq!(text, "A page with enough text\nto pass the density gate on its own.");
/// # Ok::<(), relayout::Error>(())
/// ```
pub fn extract_text<S: FragmentSource + ?Sized>(source: &S) -> Result<String> {
    DocumentExtractor::new().extract_text(source)
}

/// Reconstruct a document with custom options and no OCR.
pub fn extract_with_options<S: FragmentSource + ?Sized>(
    source: &S,
    options: ExtractOptions,
) -> Result<DocumentResult> {
    DocumentExtractor::with_options(options).extract(source)
}
