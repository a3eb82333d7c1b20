//! Layout reconstruction for a single page.
//!
//! The stages run in order over one page's fragments:
//! statistics, line clustering, line composition, block segmentation.

mod analyzer;
mod cluster;
mod compose;
mod options;
mod segment;
mod stats;

pub use analyzer::LayoutAnalyzer;
pub use cluster::LineClusterer;
pub use compose::{is_bold_font, LineComposer, Separator};
pub use options::LayoutOptions;
pub use segment::BlockSegmenter;
pub use stats::{BodyFontEstimate, FontProfile, LayoutStatistics};
