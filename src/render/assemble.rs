//! Page and document assembly.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::DocumentResult;

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

/// Collapse every run of three or more newlines to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    blank_run_regex().replace_all(text, "\n\n").into_owned()
}

/// Join page texts with a blank line, collapse blank runs, and trim.
pub fn assemble_pages<'a>(pages: impl IntoIterator<Item = &'a str>) -> String {
    let joined = pages.into_iter().collect::<Vec<_>>().join("\n\n");
    collapse_blank_lines(&joined).trim().to_string()
}

/// Convert a document to its final text, optionally NFC-normalized.
pub fn to_text(doc: &DocumentResult, normalize_unicode: bool) -> String {
    let output = doc.text();
    if normalize_unicode {
        output.nfc().collect()
    } else {
        output
    }
}
