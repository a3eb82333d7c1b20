//! Heading classification and paragraph breaks.

use crate::model::{ComposedLine, Line, PageEntry};

use super::stats::median_by_index;
use super::{LayoutOptions, LineComposer};

/// Classifies lines and inserts paragraph breaks from line spacing.
#[derive(Debug, Clone)]
pub struct BlockSegmenter<'a> {
    body_height: f64,
    avg_line_height: f64,
    options: &'a LayoutOptions,
}

impl<'a> BlockSegmenter<'a> {
    /// Create a segmenter for a page.
    pub fn new(body_height: f64, avg_line_height: f64, options: &'a LayoutOptions) -> Self {
        Self {
            body_height,
            avg_line_height,
            options,
        }
    }

    /// Short lines set noticeably larger than body text are headings.
    pub fn is_heading(&self, line: &Line) -> bool {
        line.average_height() > self.body_height * self.options.heading_height_ratio
            && line.len() < self.options.heading_max_fragments
    }

    /// Median of the typical spacing between consecutive lines.
    ///
    /// Only positive gaps below the outlier limit are sampled; without
    /// samples the spacing defaults to a multiple of the line height.
    pub fn median_line_gap(&self, lines: &[Line]) -> f64 {
        let limit = self.avg_line_height * self.options.gap_outlier_lines;
        let gaps: Vec<f64> = lines
            .windows(2)
            .map(|pair| line_gap(&pair[0], &pair[1]))
            .filter(|gap| *gap > 0.0 && *gap < limit)
            .collect();

        median_by_index(&gaps)
            .unwrap_or(self.avg_line_height * self.options.default_gap_lines)
    }

    /// Compose, classify and separate lines in reading order.
    ///
    /// Lines that compose to nothing are dropped but their spacing still
    /// counts toward paragraph breaks.
    pub fn segment(&self, lines: &[Line], composer: &LineComposer<'_>) -> Vec<PageEntry> {
        let break_threshold = self.median_line_gap(lines) * self.options.paragraph_gap_ratio;
        log::debug!("Paragraph break threshold {:.2}", break_threshold);

        let mut entries = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let text = composer.compose(line);
            if !text.is_empty() {
                let marker = self
                    .is_heading(line)
                    .then_some(self.options.heading_marker.as_str());
                entries.push(PageEntry::Line(ComposedLine::new(line, text, marker)));
            }

            let Some(next) = lines.get(i + 1) else {
                continue;
            };
            let starts_block = entries.last().is_some_and(|e: &PageEntry| !e.is_break());
            if starts_block && line_gap(line, next) > break_threshold {
                entries.push(PageEntry::Break);
            }
        }
        entries
    }
}

/// Vertical distance from one line down to the next, by mean baseline.
fn line_gap(upper: &Line, lower: &Line) -> f64 {
    upper.mean_y() - lower.mean_y()
}
