//! Grouping fragments into reading lines.

use crate::model::{Line, TextFragment};

use super::LayoutOptions;

/// An open line during clustering: the seed baseline and collected members.
#[derive(Debug)]
struct LineBuffer {
    seed_y: f64,
    members: Vec<TextFragment>,
}

/// Groups fragments into horizontal lines by baseline proximity.
///
/// Fragments are visited top-to-bottom and joined to the first open line
/// whose seed baseline lies strictly within the tolerance. A line's seed
/// is the baseline of the fragment that opened it and does not move while
/// clustering. Fragments with equal `y` keep their input order, so
/// identical input always yields identical lines.
#[derive(Debug, Clone, Copy)]
pub struct LineClusterer {
    tolerance: f64,
}

impl LineClusterer {
    /// Create a clusterer with an explicit vertical tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Create a clusterer from the page's average line height.
    pub fn for_line_height(avg_line_height: f64, options: &LayoutOptions) -> Self {
        Self::new(avg_line_height * options.line_tolerance_ratio)
    }

    /// The vertical tolerance in page units.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Cluster fragments into lines ordered top-to-bottom.
    ///
    /// Members within a line keep their visiting order; call
    /// [`Line::sort_by_x`] before composing.
    pub fn cluster(&self, mut fragments: Vec<TextFragment>) -> Vec<Line> {
        fragments.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));

        // Seeds are opened in visiting order, so `buffers` is sorted by
        // descending seed_y and every seed is >= the current fragment's y.
        // The first line within tolerance is the first seed below y + tolerance.
        let mut buffers: Vec<LineBuffer> = Vec::new();
        for fragment in fragments {
            let limit = fragment.y + self.tolerance;
            let candidate = buffers.partition_point(|b| b.seed_y >= limit);
            match buffers.get_mut(candidate) {
                Some(buffer) if (fragment.y - buffer.seed_y).abs() < self.tolerance => {
                    buffer.members.push(fragment);
                }
                _ => buffers.push(LineBuffer {
                    seed_y: fragment.y,
                    members: vec![fragment],
                }),
            }
        }

        let mut lines: Vec<Line> = buffers
            .into_iter()
            .map(|buffer| Line::from_members(buffer.members))
            .collect();
        lines.sort_by(|a, b| {
            b.representative_y
                .partial_cmp(&a.representative_y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        log::debug!(
            "Clustered into {} lines (tolerance {:.2})",
            lines.len(),
            self.tolerance
        );
        lines
    }
}
