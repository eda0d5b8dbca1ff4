use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Prefix marking a persisted extraction failure.
///
/// The cache stores failures inline as text so a document that failed once is
/// answered from the cache instead of re-running parsing/OCR. Pre-existing
/// cache entries from earlier deployments use this exact prefix; keep it
/// stable.
pub const ERROR_MARKER: &str = "__ERROR__";

/// Encode an extraction failure as marker text for persistence.
pub fn encode_failure(err: &ExtractionError) -> String {
    format!("{ERROR_MARKER} {err}")
}

/// If `text` is marker-encoded, return the failure message it carries.
pub fn failure_message(text: &str) -> Option<&str> {
    text.strip_prefix(ERROR_MARKER).map(str::trim_start)
}

/// How text was obtained from a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ExtractionMethod {
    EmbeddedText,
    Ocr,
}

/// Text of a single page, in page order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

/// Full result of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub method: ExtractionMethod,
    pub page_count: usize,
    pub text: String,
}

/// Embedded text layer abstraction (allows mocking for tests).
pub trait PdfExtractor {
    /// Per-page embedded text, in page order. Fails on unparseable documents.
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError>;

    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError>;
}

/// OCR engine abstraction.
pub trait OcrEngine {
    /// Recognize text in an encoded page image (PNG/JPEG bytes).
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ExtractionError>;

    fn ocr_image_with_lang(
        &self,
        image_bytes: &[u8],
        lang: &str,
    ) -> Result<String, ExtractionError>;
}

/// PDF page rasterization abstraction.
pub trait PdfPageRenderer {
    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError>;

    /// Render one page (0-indexed) to an encoded PNG at the given DPI.
    fn render_page(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
        dpi: u32,
    ) -> Result<Vec<u8>, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_round_trips_through_marker() {
        let err = ExtractionError::PdfParsing("unexpected EOF".into());
        let encoded = encode_failure(&err);
        assert!(encoded.starts_with(ERROR_MARKER));
        let msg = failure_message(&encoded).unwrap();
        assert!(msg.contains("unexpected EOF"));
    }

    #[test]
    fn ordinary_text_is_not_a_failure() {
        assert!(failure_message("REGISTRO 12345").is_none());
        assert!(failure_message("").is_none());
    }

    #[test]
    fn marker_without_message_yields_empty() {
        assert_eq!(failure_message("__ERROR__"), Some(""));
        assert_eq!(failure_message("__ERROR__ "), Some(""));
    }
}
