use super::types::OcrEngine;
use super::ExtractionError;
use crate::config;

/// Bundled Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: std::path::PathBuf,
    default_lang: String,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Initialize with a tessdata directory.
    ///
    /// Requires Portuguese + English traineddata: the service recognizes
    /// Brazilian documents and nothing else, so a partial install is a
    /// configuration error rather than something to degrade around.
    pub fn new(tessdata_dir: &std::path::Path) -> Result<Self, ExtractionError> {
        for lang in ["por", "eng"] {
            if !tessdata_dir.join(format!("{lang}.traineddata")).exists() {
                return Err(ExtractionError::OcrInit(format!(
                    "missing {lang}.traineddata at {}",
                    tessdata_dir.display()
                )));
            }
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            default_lang: config::OCR_LANGUAGES.to_string(),
        })
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ExtractionError> {
        self.ocr_image_with_lang(image_bytes, &self.default_lang)
    }

    fn ocr_image_with_lang(
        &self,
        image_bytes: &[u8],
        lang: &str,
    ) -> Result<String, ExtractionError> {
        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(lang))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(image_bytes)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        Ok(text)
    }
}

/// Placeholder engine for builds without the `ocr` feature.
///
/// Keeps the pipeline wiring identical across builds: scanned documents
/// fail with a typed error instead of the binary failing to link against
/// libtesseract on hosts that don't have it.
pub struct UnavailableOcr;

impl OcrEngine for UnavailableOcr {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<String, ExtractionError> {
        Err(ExtractionError::OcrUnavailable)
    }

    fn ocr_image_with_lang(
        &self,
        _image_bytes: &[u8],
        _lang: &str,
    ) -> Result<String, ExtractionError> {
        Err(ExtractionError::OcrUnavailable)
    }
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    pub text: String,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ExtractionError> {
        self.ocr_image_with_lang(image_bytes, config::OCR_LANGUAGES)
    }

    fn ocr_image_with_lang(
        &self,
        _image_bytes: &[u8],
        _lang: &str,
    ) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ocr_returns_configured_text() {
        let engine = MockOcrEngine::new("SALDO VENCIDO 1.000,00");
        let text = engine.ocr_image(b"fake_image_bytes").unwrap();
        assert_eq!(text, "SALDO VENCIDO 1.000,00");
    }

    #[test]
    fn mock_ocr_with_lang_ignores_lang() {
        let engine = MockOcrEngine::new("DATA 01/03/2024");
        let text = engine.ocr_image_with_lang(b"fake", "por").unwrap();
        assert_eq!(text, "DATA 01/03/2024");
    }

    #[test]
    fn unavailable_engine_reports_typed_error() {
        let engine = UnavailableOcr;
        assert!(matches!(
            engine.ocr_image(b"fake"),
            Err(ExtractionError::OcrUnavailable)
        ));
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn bundled_tesseract_rejects_missing_tessdata() {
        let dir = tempfile::tempdir().unwrap();
        let result = BundledTesseract::new(dir.path());
        assert!(matches!(result, Err(ExtractionError::OcrInit(_))));
    }
}
