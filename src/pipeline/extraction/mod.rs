pub mod engine;
pub mod ocr;
pub mod pdf;
pub mod pdf_renderer;
pub mod types;

pub use engine::ExtractionEngine;
pub use ocr::MockOcrEngine;
pub use pdf::EmbeddedTextExtractor;
pub use pdf_renderer::PdfiumRenderer;
pub use types::*;

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("PDF rendering failed on page {page}: {reason}")]
    PdfRendering { page: usize, reason: String },

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("OCR initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("OCR engine not available in this build")]
    OcrUnavailable,

    #[error("OCR budget of {budget:?} exhausted after {pages_done} page(s)")]
    OcrTimeout { budget: Duration, pages_done: usize },
}
