//! Document extraction: per-page layout, density gate, OCR fallback.

mod extractor;
mod options;

pub use extractor::DocumentExtractor;
pub use options::ExtractOptions;
