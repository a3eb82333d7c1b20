//! Page-wide font and geometry statistics.

use std::collections::HashMap;

use crate::model::TextFragment;

use super::LayoutOptions;

/// Height samples and frequency of one font on a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontProfile {
    /// Observed fragment heights, in page order
    pub sample_heights: Vec<f64>,
    /// Number of fragments set in this font
    pub occurrence_count: u64,
}

impl FontProfile {
    /// Add a fragment height observation.
    pub fn add_sample(&mut self, height: f64) {
        self.sample_heights.push(height);
        self.occurrence_count += 1;
    }

    /// Median height: element `n / 2` of the sorted samples, never averaged.
    pub fn median_height(&self) -> Option<f64> {
        median_by_index(&self.sample_heights)
    }
}

/// The font judged to represent running text.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFontEstimate {
    /// Font identifier
    pub font_name: String,
    /// Median height of the font
    pub body_height: f64,
    /// Fragments set in this font
    pub occurrence_count: u64,
}

/// Statistics computed once per page and read by every later stage.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStatistics {
    /// Profiles in first-seen order
    pub fonts: Vec<(String, FontProfile)>,
    /// Most frequent font, if any fragment carried text
    pub body_font: Option<BodyFontEstimate>,
    /// Mean height over all fragments
    pub avg_line_height: f64,
    /// Total width over total characters of non-empty fragments
    pub avg_char_width: f64,
    /// Height used for heading detection
    pub body_height: f64,
}

impl LayoutStatistics {
    /// Estimate statistics from all fragments of one page.
    pub fn estimate(fragments: &[TextFragment], options: &LayoutOptions) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut fonts: Vec<(String, FontProfile)> = Vec::new();
        let mut total_height = 0.0;
        let mut total_width = 0.0;
        let mut total_chars = 0usize;

        for fragment in fragments {
            total_height += fragment.height;

            if fragment.is_empty() {
                continue;
            }
            total_width += fragment.width;
            total_chars += fragment.text.chars().count();

            let slot = *index.entry(fragment.font_name.as_str()).or_insert_with(|| {
                fonts.push((fragment.font_name.clone(), FontProfile::default()));
                fonts.len() - 1
            });
            fonts[slot].1.add_sample(fragment.height);
        }

        let avg_line_height = if fragments.is_empty() {
            options.fallback_line_height
        } else {
            total_height / fragments.len() as f64
        };
        let avg_char_width = if total_chars > 0 {
            total_width / total_chars as f64
        } else {
            options.fallback_char_width
        };

        let body_font = body_font(&fonts);
        let body_height = body_font
            .as_ref()
            .map(|b| b.body_height)
            .unwrap_or(options.fallback_body_height);

        log::debug!(
            "Page statistics: {} fonts, body={:?}, avg_line_height={:.2}, avg_char_width={:.2}",
            fonts.len(),
            body_font.as_ref().map(|b| b.font_name.as_str()),
            avg_line_height,
            avg_char_width
        );

        Self {
            fonts,
            body_font,
            avg_line_height,
            avg_char_width,
            body_height,
        }
    }

    /// Look up the profile of a font.
    pub fn font(&self, name: &str) -> Option<&FontProfile> {
        self.fonts
            .iter()
            .find(|(font, _)| font == name)
            .map(|(_, profile)| profile)
    }
}

/// Pick the most frequent font; the first-seen font wins ties.
fn body_font(fonts: &[(String, FontProfile)]) -> Option<BodyFontEstimate> {
    let mut best: Option<&(String, FontProfile)> = None;
    for entry in fonts {
        if best.map_or(true, |(_, b)| entry.1.occurrence_count > b.occurrence_count) {
            best = Some(entry);
        }
    }
    best.and_then(|(name, profile)| {
        profile.median_height().map(|body_height| BodyFontEstimate {
            font_name: name.clone(),
            body_height,
            occurrence_count: profile.occurrence_count,
        })
    })
}

/// Median by index: element `n / 2` of the sorted samples.
pub(crate) fn median_by_index(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(sorted[sorted.len() / 2])
}
