//! Rendering of reconstructed documents to text and JSON.

mod assemble;
mod json;
mod stats;

pub use assemble::{assemble_pages, collapse_blank_lines, to_text};
pub use json::{to_json, JsonFormat};
pub use stats::ExtractionStats;
