//! `POST /extract` — run the extraction pipeline on one document.

use axum::extract::State;
use axum::Json;
use base64::Engine;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ExtractRequest};
use crate::service::Extraction;

/// Maximum decoded document size (25 MB). Statements and cards are a few
/// hundred KB; anything larger is a mistake, not a document.
const MAX_PDF_BYTES: usize = 25 * 1024 * 1024;

/// Decode the payload, run the pipeline on a blocking worker, and return
/// the extracted text and fields.
pub async fn extract(
    State(ctx): State<ApiContext>,
    Json(payload): Json<ExtractRequest>,
) -> Result<Json<Extraction>, ApiError> {
    let pdf_bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.pdf.trim())
        .map_err(|e| ApiError::BadRequest(format!("PDF payload is not valid base64: {e}")))?;

    if pdf_bytes.is_empty() {
        return Err(ApiError::BadRequest("PDF payload is empty".into()));
    }
    if pdf_bytes.len() > MAX_PDF_BYTES {
        return Err(ApiError::BadRequest(format!(
            "PDF exceeds the {} byte limit",
            MAX_PDF_BYTES
        )));
    }

    // Parsing and OCR are CPU-bound; keep them off the async runtime.
    let service = ctx.service.clone();
    let extraction = tokio::task::spawn_blocking(move || {
        service.process(&payload.label, &payload.extraction_schema, &pdf_bytes)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Extraction task failed: {e}")))??;

    Ok(Json(extraction))
}
