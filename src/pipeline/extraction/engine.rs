use std::time::{Duration, Instant};

use super::types::{
    ExtractedDocument, ExtractionMethod, OcrEngine, PdfExtractor, PdfPageRenderer,
};
use super::ExtractionError;
use crate::config;

/// Text extraction engine: embedded text first, OCR fallback.
///
/// Uses trait objects for the PDF text layer, page rendering, and OCR,
/// enabling dependency injection. Embedded text is exact and cheap; OCR
/// runs only when the document provably has no text layer, never
/// speculatively.
pub struct ExtractionEngine {
    pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
    ocr_engine: Box<dyn OcrEngine + Send + Sync>,
    pdf_renderer: Box<dyn PdfPageRenderer + Send + Sync>,
    ocr_budget: Option<Duration>,
}

impl ExtractionEngine {
    pub fn new(
        pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
        ocr_engine: Box<dyn OcrEngine + Send + Sync>,
        pdf_renderer: Box<dyn PdfPageRenderer + Send + Sync>,
    ) -> Self {
        Self {
            pdf_extractor,
            ocr_engine,
            pdf_renderer,
            ocr_budget: None,
        }
    }

    /// Bound the total time spent in the OCR fallback for one document.
    /// The budget is checked before each page, so cancellation is
    /// cooperative at page granularity.
    pub fn with_ocr_budget(mut self, budget: Duration) -> Self {
        self.ocr_budget = Some(budget);
        self
    }

    /// Extract plain text from a PDF.
    ///
    /// Concatenates per-page embedded text in page order; when the result is
    /// empty or whitespace-only the document is treated as image-only and
    /// every page is rasterized and OCR'd instead. Any failure along either
    /// path aborts the whole extraction; partial per-page results are never
    /// returned.
    pub fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let pages = self.pdf_extractor.extract_text(pdf_bytes)?;
        let embedded: String = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if !embedded.trim().is_empty() {
            tracing::info!(
                pages = pages.len(),
                text_length = embedded.len(),
                "Extracted embedded text layer"
            );
            return Ok(ExtractedDocument {
                method: ExtractionMethod::EmbeddedText,
                page_count: pages.len(),
                text: embedded,
            });
        }

        self.ocr_fallback(pdf_bytes)
    }

    fn ocr_fallback(&self, pdf_bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let page_count = self.pdf_renderer.page_count(pdf_bytes)?;
        tracing::info!(pages = page_count, "No embedded text, running OCR fallback");

        let started = Instant::now();
        let mut page_texts = Vec::with_capacity(page_count);

        for page_idx in 0..page_count {
            if let Some(budget) = self.ocr_budget {
                if started.elapsed() >= budget {
                    return Err(ExtractionError::OcrTimeout {
                        budget,
                        pages_done: page_idx,
                    });
                }
            }

            let png = self
                .pdf_renderer
                .render_page(pdf_bytes, page_idx, config::RENDER_DPI)?;
            let text = self.ocr_engine.ocr_image(&png)?;

            tracing::debug!(
                page = page_idx + 1,
                text_length = text.len(),
                "OCR'd page"
            );
            page_texts.push(text);
        }

        let text = page_texts.join("\n");
        tracing::info!(
            pages = page_count,
            text_length = text.len(),
            "OCR fallback complete"
        );

        Ok(ExtractedDocument {
            method: ExtractionMethod::Ocr,
            page_count,
            text,
        })
    }
}
