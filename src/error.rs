//! Error types for relayout.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for relayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing document text.
///
/// Only [`Error::ContentTooSparse`] and the input errors ([`Error::Source`],
/// [`Error::PageOutOfRange`], [`Error::Io`], [`Error::Json`]) ever reach the
/// caller of a document extraction. OCR and rasterization errors are caught
/// per page and recorded in the output instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading fragment dumps or configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON fragment dump or configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The fragment source failed to deliver a page.
    #[error("Fragment source error: {0}")]
    Source(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Too little text survived extraction and OCR to be a usable document.
    #[error(
        "Could not extract sufficient text: {chars} characters found, at least {minimum} required. \
         The document may be empty, corrupted, or an image without readable text"
    )]
    ContentTooSparse {
        /// Characters in the chosen text
        chars: usize,
        /// Required minimum
        minimum: usize,
    },

    /// Rendering a page to an image failed.
    #[error("Rasterization error: {0}")]
    Rasterize(String),

    /// The OCR engine failed to recognize a page.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// OCR did not finish within the configured time.
    #[error("OCR timed out after {0:?}")]
    OcrTimeout(Duration),

    /// OCR was cancelled before the page was recognized.
    #[error("OCR cancelled")]
    Cancelled,

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error is recovered per page instead of failing the document.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Rasterize(_) | Error::Ocr(_) | Error::OcrTimeout(_) | Error::Cancelled
        )
    }
}
