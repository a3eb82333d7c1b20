//! OCR fallback for pages without a usable text layer.
//!
//! The crate does not recognize text itself: callers plug in a
//! [`PageRasterizer`] and an [`OcrEngine`]. This module decides when to use
//! them and runs them under a per-page timeout.

mod engine;
mod gate;
mod options;

pub use engine::{CancellationToken, OcrEngine, OcrRunner, PageOcr, PageRasterizer};
pub use gate::DensityGate;
pub use options::{OcrOptions, OCR_FAILURE_MARKER};
