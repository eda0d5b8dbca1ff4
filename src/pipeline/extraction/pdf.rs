use super::types::{PageText, PdfExtractor};
use super::ExtractionError;

/// Embedded text layer extractor using the pdf-extract crate.
/// Handles digitally-generated PDFs; scanned PDFs yield empty pages here
/// and fall through to the OCR path.
pub struct EmbeddedTextExtractor;

impl PdfExtractor for EmbeddedTextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        let pages = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText {
                page_number: i + 1,
                text,
            })
            .collect();

        Ok(pages)
    }

    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
        Ok(pages.len())
    }
}
