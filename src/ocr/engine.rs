//! OCR collaborators and the per-page runner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use image::RgbaImage;

use crate::error::{Error, Result};

use super::OcrOptions;

/// Renders a page to pixels.
pub trait PageRasterizer: Send + Sync {
    /// Render a page (0-based) at the given scale.
    fn rasterize(&self, page: u32, scale: f32) -> Result<RgbaImage>;
}

/// Recognizes text in a rendered page.
pub trait OcrEngine: Send + Sync {
    /// Return the recognized plain text.
    fn recognize(&self, image: &RgbaImage) -> Result<String>;
}

/// Shared flag for abandoning OCR on the remaining pages.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation so later pages run again.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

/// Outcome of OCR on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOcr {
    /// Text recognized from the page image
    Recognized(String),
    /// Rasterization or recognition failed, or nothing was recognized
    Failed(String),
}

impl PageOcr {
    /// Recognized text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            PageOcr::Recognized(text) => Some(text),
            PageOcr::Failed(_) => None,
        }
    }

    /// Check if the page failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, PageOcr::Failed(_))
    }
}

/// Rasterizes and recognizes pages, one worker thread per page.
///
/// The caller waits on a channel, bounded by the configured timeout. A page
/// that times out is reported as failed; its worker is left to finish in
/// the background and its result is discarded. A panicking engine is
/// reported the same way.
#[derive(Clone)]
pub struct OcrRunner {
    rasterizer: Arc<dyn PageRasterizer>,
    engine: Arc<dyn OcrEngine>,
    scale: f32,
    timeout: Option<Duration>,
}

impl OcrRunner {
    /// Create a runner from its collaborators.
    pub fn new(
        rasterizer: Arc<dyn PageRasterizer>,
        engine: Arc<dyn OcrEngine>,
        options: &OcrOptions,
    ) -> Self {
        Self {
            rasterizer,
            engine,
            scale: options.raster_scale,
            timeout: options.page_timeout,
        }
    }

    /// OCR one page, recovering every failure into [`PageOcr::Failed`].
    pub fn run_page(&self, page: u32, token: &CancellationToken) -> PageOcr {
        match self.try_page(page, token) {
            Ok(text) => {
                log::debug!("OCR page {}: {} characters", page, text.chars().count());
                PageOcr::Recognized(text)
            }
            Err(e) => {
                log::warn!("OCR failed on page {}: {}", page, e);
                PageOcr::Failed(e.to_string())
            }
        }
    }

    fn try_page(&self, page: u32, token: &CancellationToken) -> Result<String> {
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let (tx, rx) = crossbeam_channel::bounded::<Result<String>>(1);
        let rasterizer = Arc::clone(&self.rasterizer);
        let engine = Arc::clone(&self.engine);
        let scale = self.scale;

        thread::Builder::new()
            .name(format!("ocr-page-{}", page))
            .spawn(move || {
                let result = rasterizer
                    .rasterize(page, scale)
                    .and_then(|image| engine.recognize(&image));
                // The receiver is gone after a timeout
                let _ = tx.send(result);
            })
            .map_err(|e| Error::Ocr(format!("could not start OCR worker: {}", e)))?;

        let received = match self.timeout {
            Some(timeout) => rx.recv_timeout(timeout),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(Ok(text)) if text.trim().is_empty() => {
                Err(Error::Ocr("engine returned no text".to_string()))
            }
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(Error::OcrTimeout(self.timeout.unwrap_or_default())),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::Ocr("OCR worker stopped without a result".to_string()))
            }
        }
    }
}

impl std::fmt::Debug for OcrRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrRunner")
            .field("scale", &self.scale)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
