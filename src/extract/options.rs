//! Extraction options and configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::LayoutOptions;
use crate::ocr::OcrOptions;

/// Options for reconstructing a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Layout thresholds
    pub layout: LayoutOptions,

    /// Density gate and OCR settings
    pub ocr: OcrOptions,

    /// Whether to process pages in parallel
    pub parallel: bool,

    /// Whether to NFC-normalize the final text
    pub normalize_unicode: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set OCR options.
    pub fn with_ocr(mut self, ocr: OcrOptions) -> Self {
        self.ocr = ocr;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable Unicode normalization of the output.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            ocr: OcrOptions::default(),
            parallel: true,
            normalize_unicode: false,
        }
    }
}
