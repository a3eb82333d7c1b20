//! Reading lines built from fragments.

use super::TextFragment;
use serde::{Deserialize, Serialize};

/// A cluster of fragments sharing a horizontal baseline band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Mean baseline of the members
    pub representative_y: f64,
    /// Member fragments (left-to-right once sorted)
    pub members: Vec<TextFragment>,
}

impl Line {
    /// Create a line from its members, computing the representative baseline.
    pub fn from_members(members: Vec<TextFragment>) -> Self {
        let representative_y = mean(members.iter().map(|f| f.y));
        Self {
            representative_y,
            members,
        }
    }

    /// Mean baseline of the members.
    pub fn mean_y(&self) -> f64 {
        mean(self.members.iter().map(|f| f.y))
    }

    /// Mean member height.
    pub fn average_height(&self) -> f64 {
        mean(self.members.iter().map(|f| f.height))
    }

    /// Number of member fragments.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the line has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Order members left-to-right.
    pub fn sort_by_x(&mut self) {
        self.members
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }
}

/// A line after composition and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedLine {
    /// Mean baseline of the source line
    pub y: f64,
    /// Mean fragment height of the source line
    pub height: f64,
    /// Number of fragments composed into this line
    pub fragment_count: usize,
    /// Whether the line was classified as a heading
    pub is_heading: bool,
    /// Composed text with separators and emphasis, without heading marker
    pub text: String,
    /// Final text including the heading marker when `is_heading`
    pub rendered: String,
}

impl ComposedLine {
    /// Build a composed line from its source line and composed text.
    pub fn new(line: &Line, text: String, heading_marker: Option<&str>) -> Self {
        let rendered = match heading_marker {
            Some(marker) => format!("{}{}", marker, text),
            None => text.clone(),
        };
        Self {
            y: line.mean_y(),
            height: line.average_height(),
            fragment_count: line.len(),
            is_heading: heading_marker.is_some(),
            text,
            rendered,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
