//! Density gate: when to try OCR, and whether to keep its text.

use super::OcrOptions;

/// Decides whether a document's text layer is too sparse to be genuine.
#[derive(Debug, Clone)]
pub struct DensityGate<'a> {
    options: &'a OcrOptions,
}

impl<'a> DensityGate<'a> {
    /// Create a gate with the given thresholds.
    pub fn new(options: &'a OcrOptions) -> Self {
        Self { options }
    }

    /// Average extracted characters per page.
    pub fn chars_per_page(total_chars: u64, page_count: u32) -> f64 {
        if page_count == 0 {
            0.0
        } else {
            total_chars as f64 / page_count as f64
        }
    }

    /// Whether the document should be OCR'd.
    pub fn needs_ocr(&self, total_chars: u64, page_count: u32) -> bool {
        page_count > 0 && Self::chars_per_page(total_chars, page_count) < self.options.min_chars_per_page
    }

    /// Whether recognized text should replace extracted text.
    ///
    /// OCR wins when it is strictly longer, or when the extracted text is
    /// nearly empty and OCR found something substantive.
    pub fn prefer_ocr(&self, extracted_chars: usize, ocr_chars: usize) -> bool {
        ocr_chars > extracted_chars
            || (extracted_chars < self.options.prefer_ocr_below_chars
                && ocr_chars > self.options.min_ocr_chars)
    }

    /// Whether the final text is long enough to be a usable document.
    pub fn is_sufficient(&self, chars: usize) -> bool {
        chars >= self.options.min_document_chars
    }
}
