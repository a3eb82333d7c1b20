//! OCR fallback thresholds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Diagnostic appended to the output when OCR failed on any page.
pub const OCR_FAILURE_MARKER: &str = "[OCR processing failed; text may be incomplete]";

/// Density gate and OCR selection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrOptions {
    /// Documents averaging fewer extracted characters per page are OCR'd
    pub min_chars_per_page: f64,

    /// OCR wins when extracted text is shorter than this...
    pub prefer_ocr_below_chars: usize,

    /// ...and recognized text is longer than this
    pub min_ocr_chars: usize,

    /// Documents with less final text than this are rejected
    pub min_document_chars: usize,

    /// Scale factor for rendering pages before recognition
    pub raster_scale: f32,

    /// Upper bound on rasterizing and recognizing one page
    #[serde(with = "optional_secs")]
    pub page_timeout: Option<Duration>,

    /// In-band diagnostic for failed pages
    pub failure_marker: String,
}

impl OcrOptions {
    /// Create new OCR options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the density gate.
    pub fn with_min_chars_per_page(mut self, chars: f64) -> Self {
        self.min_chars_per_page = chars;
        self
    }

    /// Set the minimum document length.
    pub fn with_min_document_chars(mut self, chars: usize) -> Self {
        self.min_document_chars = chars;
        self
    }

    /// Set the rasterization scale.
    pub fn with_raster_scale(mut self, scale: f32) -> Self {
        self.raster_scale = scale;
        self
    }

    /// Set or clear the per-page timeout.
    pub fn with_page_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.page_timeout = timeout;
        self
    }
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            min_chars_per_page: 50.0,
            prefer_ocr_below_chars: 100,
            min_ocr_chars: 10,
            min_document_chars: 20,
            raster_scale: 2.0,
            page_timeout: Some(Duration::from_secs(60)),
            failure_marker: OCR_FAILURE_MARKER.to_string(),
        }
    }
}

/// Timeouts as fractional seconds in configuration files.
mod optional_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&d.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<f64>::deserialize(deserializer)?;
        match secs {
            Some(s) => Duration::try_from_secs_f64(s)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid timeout {}: {}", s, e))),
            None => Ok(None),
        }
    }
}
