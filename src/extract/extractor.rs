//! Document-level extraction with OCR fallback.

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::layout::LayoutAnalyzer;
use crate::model::{DocumentResult, OcrFailure, PageResult, TextFragment, TextSelection};
use crate::ocr::{CancellationToken, DensityGate, OcrEngine, OcrRunner, PageOcr, PageRasterizer};
use crate::render::{assemble_pages, to_text};
use crate::source::FragmentSource;

use super::ExtractOptions;

/// Reconstructs whole documents from a [`FragmentSource`].
///
/// Pages are analyzed independently (in parallel unless disabled). When
/// the average extracted text per page falls below the density gate and
/// OCR collaborators are configured, every page is OCR'd and the better
/// source is kept.
pub struct DocumentExtractor {
    options: ExtractOptions,
    analyzer: LayoutAnalyzer,
    ocr: Option<(Arc<dyn PageRasterizer>, Arc<dyn OcrEngine>)>,
    token: CancellationToken,
}

impl DocumentExtractor {
    /// Create an extractor with default options and no OCR.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an extractor with custom options and no OCR.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            analyzer: LayoutAnalyzer::new(options.layout.clone()),
            options,
            ocr: None,
            token: CancellationToken::new(),
        }
    }

    /// Enable the OCR fallback.
    pub fn with_ocr(
        mut self,
        rasterizer: Arc<dyn PageRasterizer>,
        engine: Arc<dyn OcrEngine>,
    ) -> Self {
        self.ocr = Some((rasterizer, engine));
        self
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Token that cancels OCR for pages not yet started.
    ///
    /// The token is shared by every extraction on this extractor and stays
    /// cancelled until [`CancellationToken::reset`] is called.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Reconstruct a document.
    ///
    /// A source with no pages yields an empty document. Fails with
    /// [`Error::ContentTooSparse`] when too little text remains after the
    /// OCR fallback.
    pub fn extract<S: FragmentSource + ?Sized>(&self, source: &S) -> Result<DocumentResult> {
        let page_count = source.page_count();
        if page_count == 0 {
            log::debug!("Source has no pages");
            return Ok(DocumentResult::default());
        }

        let mut page_fragments = Vec::with_capacity(page_count as usize);
        for page in 0..page_count {
            page_fragments.push(source.fragments_for_page(page)?);
        }

        let mut doc = DocumentResult::new(self.analyze_pages(page_fragments));

        let gate = DensityGate::new(&self.options.ocr);
        let total_chars = doc.extracted_char_count();
        if gate.needs_ocr(total_chars, page_count) {
            log::info!(
                "Low text density ({:.0} chars/page), attempting OCR",
                DensityGate::chars_per_page(total_chars, page_count)
            );
            match &self.ocr {
                Some((rasterizer, engine)) => {
                    let runner =
                        OcrRunner::new(Arc::clone(rasterizer), Arc::clone(engine), &self.options.ocr);
                    let results = self.run_ocr(&runner, page_count);
                    self.apply_ocr(&mut doc, results, &gate);
                }
                None => log::warn!("No OCR engine configured, keeping extracted text"),
            }
        }

        let chars = doc.content().chars().count();
        if !gate.is_sufficient(chars) {
            return Err(Error::ContentTooSparse {
                chars,
                minimum: self.options.ocr.min_document_chars,
            });
        }

        Ok(doc)
    }

    /// Reconstruct a document and return its final text.
    pub fn extract_text<S: FragmentSource + ?Sized>(&self, source: &S) -> Result<String> {
        let doc = self.extract(source)?;
        Ok(to_text(&doc, self.options.normalize_unicode))
    }

    fn analyze_pages(&self, pages: Vec<Vec<TextFragment>>) -> Vec<PageResult> {
        if self.options.parallel {
            pages
                .into_par_iter()
                .enumerate()
                .map(|(i, fragments)| self.analyzer.analyze_page(i as u32, fragments))
                .collect()
        } else {
            pages
                .into_iter()
                .enumerate()
                .map(|(i, fragments)| self.analyzer.analyze_page(i as u32, fragments))
                .collect()
        }
    }

    fn run_ocr(&self, runner: &OcrRunner, page_count: u32) -> Vec<PageOcr> {
        if self.options.parallel {
            (0..page_count)
                .into_par_iter()
                .map(|page| runner.run_page(page, &self.token))
                .collect()
        } else {
            (0..page_count)
                .map(|page| runner.run_page(page, &self.token))
                .collect()
        }
    }

    /// Choose between extracted and recognized text for the whole document.
    fn apply_ocr(&self, doc: &mut DocumentResult, results: Vec<PageOcr>, gate: &DensityGate<'_>) {
        doc.ocr_attempted = true;
        let marker = self.options.ocr.failure_marker.as_str();
        for (page, result) in doc.pages.iter_mut().zip(&results) {
            if let PageOcr::Failed(reason) = result {
                page.mark_ocr_failed(marker);
                doc.ocr_failures.push(OcrFailure {
                    page: page.number,
                    reason: reason.clone(),
                });
            }
        }

        if doc.ocr_failures.len() == results.len() {
            log::warn!("OCR failed on every page, keeping extracted text");
            doc.selection = TextSelection::Extracted;
            return;
        }

        let extracted_chars = doc.content().chars().count();
        let ocr_chars = assemble_pages(results.iter().map(|r| r.text().unwrap_or("")))
            .chars()
            .count();
        if !gate.prefer_ocr(extracted_chars, ocr_chars) {
            log::info!(
                "Keeping extracted text ({} chars) over OCR ({} chars)",
                extracted_chars,
                ocr_chars
            );
            doc.selection = TextSelection::Extracted;
            return;
        }

        let mut fallback_pages = Vec::new();
        for (page, result) in doc.pages.iter_mut().zip(results) {
            match result {
                PageOcr::Recognized(text) => page.use_ocr_text(text),
                PageOcr::Failed(_) => fallback_pages.push(page.number),
            }
        }
        log::info!(
            "Using OCR text ({} chars) over extracted text ({} chars)",
            ocr_chars,
            extracted_chars
        );
        doc.selection = if fallback_pages.is_empty() {
            TextSelection::Ocr
        } else {
            TextSelection::Hybrid { fallback_pages }
        };
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn body_line(text: &str, y: f64) -> TextFragment {
        TextFragment::new(text, 0.0, y, text.chars().count() as f64 * 6.0, 10.0, "Regular")
    }

    #[test]
    fn test_no_pages_is_empty_not_error() {
        let extractor = DocumentExtractor::new();
        let doc = extractor.extract(&MemorySource::default()).unwrap();
        assert!(doc.is_empty());
        assert_eq!(extractor.extract_text(&MemorySource::default()).unwrap(), "");
    }

    #[test]
    fn test_sparse_without_ocr_fails() {
        let source = MemorySource::new(vec![vec![body_line("tiny", 700.0)]]);
        let err = DocumentExtractor::new().extract(&source).unwrap_err();
        assert!(matches!(err, Error::ContentTooSparse { chars: 4, minimum: 20 }));
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let pages: Vec<Vec<TextFragment>> = (0..6)
            .map(|p| {
                (0..8)
                    .map(|i| body_line(&format!("page {} line {} of body text", p, i), 700.0 - i as f64 * 12.0))
                    .collect()
            })
            .collect();
        let source = MemorySource::new(pages);

        let parallel = DocumentExtractor::new().extract(&source).unwrap();
        let sequential = DocumentExtractor::with_options(ExtractOptions::new().sequential())
            .extract(&source)
            .unwrap();
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.pages[5].number, 5);
        assert!(parallel.text().starts_with("page 0 line 0"));
    }
}
