//! Integration tests for the density gate and OCR fallback.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use image::RgbaImage;
use relayout::ocr::OCR_FAILURE_MARKER;
use relayout::{
    DocumentExtractor, Error, ExtractOptions, FragmentSource, MemorySource, OcrEngine, OcrOptions,
    PageRasterizer, Result, SourceKind, TextFragment, TextSelection,
};

/// Encodes the page index in the image width.
struct MockRasterizer {
    failing: HashSet<u32>,
}

impl MockRasterizer {
    fn new() -> Arc<Self> {
        Self::failing(&[])
    }

    fn failing(pages: &[u32]) -> Arc<Self> {
        Arc::new(Self {
            failing: pages.iter().copied().collect(),
        })
    }
}

impl PageRasterizer for MockRasterizer {
    fn rasterize(&self, page: u32, _scale: f32) -> Result<RgbaImage> {
        if self.failing.contains(&page) {
            return Err(Error::Rasterize(format!("cannot render page {}", page)));
        }
        Ok(RgbaImage::new(page + 1, 1))
    }
}

/// Returns a fixed text per page and counts its calls.
struct ScriptedEngine {
    pages: Vec<String>,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    fn new(pages: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages.iter().map(|s| s.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for ScriptedEngine {
    fn recognize(&self, image: &RgbaImage) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let page = image.width() as usize - 1;
        self.pages
            .get(page)
            .cloned()
            .ok_or_else(|| Error::Ocr(format!("no script for page {}", page)))
    }
}

struct SlowEngine;

impl OcrEngine for SlowEngine {
    fn recognize(&self, _image: &RgbaImage) -> Result<String> {
        thread::sleep(Duration::from_millis(500));
        Ok("recognized too late".to_string())
    }
}

struct BrokenSource;

impl FragmentSource for BrokenSource {
    fn page_count(&self) -> u32 {
        2
    }

    fn fragments_for_page(&self, page: u32) -> Result<Vec<TextFragment>> {
        Err(Error::Source(format!("corrupt content stream on page {}", page)))
    }
}

fn page_of(text: &str) -> Vec<TextFragment> {
    vec![TextFragment::new(
        text,
        0.0,
        700.0,
        text.chars().count() as f64 * 6.0,
        10.0,
        "F1",
    )]
}

fn source_of(texts: &[&str]) -> MemorySource {
    MemorySource::new(texts.iter().map(|t| page_of(t)).collect())
}

fn scanned_page_text(n: u32) -> String {
    format!("Recognized page {} with a paragraph of real content.", n)
}

#[test]
fn test_dense_document_skips_ocr() {
    let text = "A page with plenty of genuine extracted text on it.";
    let source = source_of(&[text, text, text]);
    let engine = ScriptedEngine::new(&["unused"]);

    let doc = DocumentExtractor::new()
        .with_ocr(MockRasterizer::new(), engine.clone())
        .extract(&source)
        .unwrap();

    assert!(!doc.ocr_attempted);
    assert_eq!(doc.selection, TextSelection::Extracted);
    assert_eq!(engine.calls(), 0);
}

#[test]
fn test_scanned_document_uses_ocr() {
    let source = source_of(&["scan noise", "scan noise", "scan noise"]);
    let scripts: Vec<String> = (0..3).map(scanned_page_text).collect();
    let engine = ScriptedEngine::new(&scripts.iter().map(String::as_str).collect::<Vec<_>>());

    let extractor = DocumentExtractor::new().with_ocr(MockRasterizer::new(), engine.clone());
    let doc = extractor.extract(&source).unwrap();

    assert!(doc.ocr_attempted);
    assert_eq!(doc.selection, TextSelection::Ocr);
    assert_eq!(doc.ocr_page_count(), 3);
    assert!(doc.ocr_failures.is_empty());
    assert!(!doc.has_diagnostics());
    assert_eq!(engine.calls(), 3);
    assert_eq!(doc.text(), scripts.join("\n\n"));
}

#[test]
fn test_sequential_ocr_keeps_page_order() {
    let source = source_of(&["scan noise", "scan noise", "scan noise"]);
    let scripts: Vec<String> = (0..3).map(scanned_page_text).collect();
    let engine = ScriptedEngine::new(&scripts.iter().map(String::as_str).collect::<Vec<_>>());

    let text = DocumentExtractor::with_options(ExtractOptions::new().sequential())
        .with_ocr(MockRasterizer::new(), engine)
        .extract_text(&source)
        .unwrap();
    assert_eq!(text, scripts.join("\n\n"));
}

#[test]
fn test_longer_extracted_text_is_kept() {
    // 4 pages of 40 characters: sparse, but OCR finds less
    let text = "Forty characters of extracted page text.";
    assert_eq!(text.chars().count(), 40);
    let source = source_of(&[text, text, text, text]);
    let engine = ScriptedEngine::new(&["ocr", "ocr", "ocr", "ocr"]);

    let doc = DocumentExtractor::new()
        .with_ocr(MockRasterizer::new(), engine)
        .extract(&source)
        .unwrap();

    assert!(doc.ocr_attempted);
    assert_eq!(doc.selection, TextSelection::Extracted);
    assert_eq!(doc.ocr_page_count(), 0);
    assert!(doc.text().starts_with(text));
}

#[test]
fn test_near_empty_extraction_prefers_modest_ocr() {
    // 29 recognized characters win although the extraction is longer
    let extracted = "Forty characters of extracted page text.";
    let recognized = "Thirty characters of OCR text";
    assert_eq!(recognized.chars().count(), 29);
    let source = source_of(&[extracted]);

    let doc = DocumentExtractor::new()
        .with_ocr(MockRasterizer::new(), ScriptedEngine::new(&[recognized]))
        .extract(&source)
        .unwrap();

    assert_eq!(doc.selection, TextSelection::Ocr);
    assert_eq!(doc.text(), recognized);
}

#[test]
fn test_partial_failure_is_hybrid() {
    let source = source_of(&["scan noise", "scan leftover", "scan noise"]);
    let scripts: Vec<String> = (0..3).map(scanned_page_text).collect();
    let engine = ScriptedEngine::new(&scripts.iter().map(String::as_str).collect::<Vec<_>>());

    let doc = DocumentExtractor::new()
        .with_ocr(MockRasterizer::failing(&[1]), engine.clone())
        .extract(&source)
        .unwrap();

    assert_eq!(
        doc.selection,
        TextSelection::Hybrid {
            fallback_pages: vec![1]
        }
    );
    assert_eq!(doc.ocr_failures.len(), 1);
    assert_eq!(doc.ocr_failures[0].page, 1);
    assert!(doc.ocr_failures[0].reason.contains("cannot render page 1"));
    assert_eq!(doc.pages[1].source, SourceKind::ExtractedText);
    assert_eq!(engine.calls(), 2);

    let expected = format!(
        "{}\n\nscan leftover\n{}\n\n{}",
        scripts[0], OCR_FAILURE_MARKER, scripts[2]
    );
    assert_eq!(doc.text(), expected);
}

#[test]
fn test_total_failure_keeps_extracted_text_with_marker() {
    let source = source_of(&["scan noise", "scan noise", "scan noise"]);

    let doc = DocumentExtractor::new()
        .with_ocr(MockRasterizer::failing(&[0, 1, 2]), ScriptedEngine::new(&[]))
        .extract(&source)
        .unwrap();

    assert!(doc.ocr_attempted);
    assert_eq!(doc.selection, TextSelection::Extracted);
    assert_eq!(doc.ocr_failures.len(), 3);
    assert!(doc
        .pages
        .iter()
        .all(|p| p.diagnostic.as_deref() == Some(OCR_FAILURE_MARKER)));
    let slot = format!("scan noise\n{}", OCR_FAILURE_MARKER);
    assert_eq!(doc.text(), [slot.as_str(); 3].join("\n\n"));
    assert_eq!(doc.content(), "scan noise\n\nscan noise\n\nscan noise");
}

#[test]
fn test_empty_recognition_is_recorded_as_failure() {
    let text = "Scan noise but long enough text";
    let source = source_of(&[text]);

    let doc = DocumentExtractor::new()
        .with_ocr(MockRasterizer::new(), ScriptedEngine::new(&[""]))
        .extract(&source)
        .unwrap();

    assert_eq!(doc.ocr_failures.len(), 1);
    assert!(doc.ocr_failures[0].reason.contains("no text"));
    assert_eq!(doc.selection, TextSelection::Extracted);
    assert_eq!(doc.text(), format!("{}\n{}", text, OCR_FAILURE_MARKER));
}

#[test]
fn test_empty_page_keeps_extracted_text_when_ocr_wins() {
    let source = source_of(&["scan noise", "scan leftover"]);
    let recognized = scanned_page_text(0);
    let engine = ScriptedEngine::new(&[recognized.as_str(), "   "]);

    let doc = DocumentExtractor::new()
        .with_ocr(MockRasterizer::new(), engine)
        .extract(&source)
        .unwrap();

    assert_eq!(
        doc.selection,
        TextSelection::Hybrid {
            fallback_pages: vec![1]
        }
    );
    assert_eq!(
        doc.text(),
        format!("{}\n\nscan leftover\n{}", recognized, OCR_FAILURE_MARKER)
    );
}

#[test]
fn test_too_sparse_after_ocr() {
    let source = source_of(&["ab"]);

    let err = DocumentExtractor::new()
        .with_ocr(MockRasterizer::new(), ScriptedEngine::new(&[""]))
        .extract(&source)
        .unwrap_err();

    assert!(matches!(err, Error::ContentTooSparse { chars: 2, minimum: 20 }));
    assert!(!err.is_recoverable());
    assert!(err.to_string().contains("2 characters found"));
}

#[test]
fn test_marker_does_not_count_toward_minimum() {
    let source = source_of(&["ab"]);

    let err = DocumentExtractor::new()
        .with_ocr(MockRasterizer::failing(&[0]), ScriptedEngine::new(&[]))
        .extract(&source)
        .unwrap_err();

    assert!(matches!(err, Error::ContentTooSparse { chars: 2, .. }));
}

#[test]
fn test_slow_page_times_out() {
    let source = source_of(&["scan noise", "scan noise"]);
    let options = ExtractOptions::new()
        .with_ocr(OcrOptions::new().with_page_timeout(Some(Duration::from_millis(50))));

    let doc = DocumentExtractor::with_options(options)
        .with_ocr(MockRasterizer::new(), Arc::new(SlowEngine))
        .extract(&source)
        .unwrap();

    assert_eq!(doc.ocr_failures.len(), 2);
    assert!(doc.ocr_failures.iter().all(|f| f.reason.contains("timed out")));
    assert_eq!(doc.selection, TextSelection::Extracted);
    assert!(doc.text().ends_with(OCR_FAILURE_MARKER));
}

#[test]
fn test_cancelled_before_ocr() {
    let source = source_of(&["scan noise", "scan noise"]);
    let engine = ScriptedEngine::new(&["Recognized after the reset", "Second page after the reset"]);
    let extractor = DocumentExtractor::new().with_ocr(MockRasterizer::new(), engine.clone());

    extractor.cancellation_token().cancel();
    let doc = extractor.extract(&source).unwrap();

    assert_eq!(engine.calls(), 0);
    assert!(doc.ocr_failures.iter().all(|f| f.reason == "OCR cancelled"));
    assert_eq!(doc.selection, TextSelection::Extracted);

    // Cancellation holds until reset
    let again = extractor.extract(&source).unwrap();
    assert_eq!(engine.calls(), 0);
    assert_eq!(again.ocr_failures.len(), 2);

    extractor.cancellation_token().reset();
    let resumed = extractor.extract(&source).unwrap();
    assert_eq!(engine.calls(), 2);
    assert!(resumed.ocr_failures.is_empty());
}

#[test]
fn test_custom_density_threshold() {
    let source = source_of(&["scan noise", "scan noise"]);
    let options = ExtractOptions::new().with_ocr(
        OcrOptions::new()
            .with_min_chars_per_page(5.0)
            .with_min_document_chars(10),
    );
    let engine = ScriptedEngine::new(&["unused"]);

    let doc = DocumentExtractor::with_options(options)
        .with_ocr(MockRasterizer::new(), engine.clone())
        .extract(&source)
        .unwrap();

    assert!(!doc.ocr_attempted);
    assert_eq!(engine.calls(), 0);
}

#[test]
fn test_source_errors_propagate() {
    let err = DocumentExtractor::new().extract(&BrokenSource).unwrap_err();
    assert!(matches!(err, Error::Source(msg) if msg.contains("page 0")));
}
