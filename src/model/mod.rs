//! Data model for layout reconstruction.
//!
//! Fragments come in from a page content reader, are grouped into lines,
//! composed into text, and collected into per-page and per-document
//! results. Everything here is page-scoped value data.

mod document;
mod fragment;
mod line;
mod page;

pub use document::{DocumentResult, OcrFailure, TextSelection};
pub use fragment::TextFragment;
pub use line::{ComposedLine, Line};
pub use page::{PageEntry, PageResult, SourceKind};
