//! Page layout analysis: fragments in, reading-order text out.

use crate::model::{PageResult, TextFragment};

use super::{BlockSegmenter, LayoutOptions, LayoutStatistics, LineClusterer, LineComposer};

/// Layout analyzer for reconstructing structured text from one page's fragments.
///
/// Every stage is page-local and total: any input, including an empty one,
/// produces a result.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    options: LayoutOptions,
}

impl LayoutAnalyzer {
    /// Create a new layout analyzer.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// The thresholds in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Reconstruct one page.
    pub fn analyze_page(&self, number: u32, mut fragments: Vec<TextFragment>) -> PageResult {
        fragments.retain(TextFragment::has_finite_extent);
        if fragments.is_empty() {
            return PageResult::empty(number);
        }

        let stats = LayoutStatistics::estimate(&fragments, &self.options);

        let placeable: Vec<TextFragment> = fragments
            .into_iter()
            .filter(|f| !f.is_empty() && f.has_finite_position())
            .collect();
        if placeable.is_empty() {
            return PageResult::empty(number);
        }

        let clusterer = LineClusterer::for_line_height(stats.avg_line_height, &self.options);
        let mut lines = clusterer.cluster(placeable);
        for line in &mut lines {
            line.sort_by_x();
        }

        let composer = LineComposer::new(stats.avg_char_width, &self.options);
        let segmenter =
            BlockSegmenter::new(stats.body_height, stats.avg_line_height, &self.options);
        let entries = segmenter.segment(&lines, &composer);

        let page = PageResult::new(number, entries);
        log::debug!(
            "Page {}: {} lines, {} characters",
            number,
            page.lines().count(),
            page.extracted_char_count
        );
        page
    }

    /// Reconstruct one page and return its text.
    pub fn page_text(&self, fragments: Vec<TextFragment>) -> String {
        self.analyze_page(0, fragments).extracted_text()
    }
}
