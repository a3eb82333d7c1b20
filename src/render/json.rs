//! JSON rendering for reconstructed documents.

use crate::error::{Error, Result};
use crate::model::DocumentResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &DocumentResult, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComposedLine, Line, PageEntry, PageResult, TextFragment};

    fn sample() -> DocumentResult {
        let line = Line::from_members(vec![TextFragment::new("Summary", 0.0, 700.0, 60.0, 16.0, "Bold")]);
        let page = PageResult::new(
            0,
            vec![
                PageEntry::Line(ComposedLine::new(&line, "**Summary**".to_string(), Some("## "))),
                PageEntry::Break,
            ],
        );
        DocumentResult::new(vec![page])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"is_heading\": true"));
        assert!(json.contains("\"type\": \"break\""));
        assert!(json.contains("\"source\": \"extracted_text\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"selection\":{\"kind\":\"extracted\"}"));
    }

    #[test]
    fn test_json_round_trip_keeps_selection() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        let back: DocumentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
