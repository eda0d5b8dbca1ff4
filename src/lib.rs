pub mod api;
pub mod cache;
pub mod config;
pub mod pipeline;
pub mod service;
pub mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::cache::TextCache;
use crate::pipeline::extraction::types::OcrEngine;
use crate::pipeline::extraction::{EmbeddedTextExtractor, ExtractionEngine, PdfiumRenderer};
use crate::service::ExtractionService;
use crate::store::KnowledgeStore;

/// Wire up the pipeline with its production collaborators.
pub fn build_service() -> Result<ExtractionService, String> {
    let cache = TextCache::open(&config::cache_dir())
        .map_err(|e| format!("Failed to open text cache: {e}"))?;
    let knowledge = KnowledgeStore::new(&config::knowledge_base_path());

    // A missing PDFium install only disables the OCR fallback; documents
    // with an embedded text layer still extract, so don't refuse to start.
    let renderer = match PdfiumRenderer::new() {
        Ok(renderer) => renderer,
        Err(e) => {
            tracing::warn!(error = %e, "PDFium unavailable; scanned documents will fail");
            PdfiumRenderer
        }
    };

    let mut engine =
        ExtractionEngine::new(Box::new(EmbeddedTextExtractor), ocr_engine()?, Box::new(renderer));
    if let Some(budget) = config::ocr_budget() {
        engine = engine.with_ocr_budget(budget);
    }

    Ok(ExtractionService::new(engine, cache, knowledge))
}

#[cfg(feature = "ocr")]
fn ocr_engine() -> Result<Box<dyn OcrEngine + Send + Sync>, String> {
    use crate::pipeline::extraction::ocr::BundledTesseract;

    let engine = BundledTesseract::new(&config::tessdata_dir())
        .map_err(|e| format!("Failed to initialize Tesseract: {e}"))?;
    Ok(Box::new(engine))
}

#[cfg(not(feature = "ocr"))]
fn ocr_engine() -> Result<Box<dyn OcrEngine + Send + Sync>, String> {
    use crate::pipeline::extraction::ocr::UnavailableOcr;

    tracing::warn!("Built without the `ocr` feature; image-only documents will fail");
    Ok(Box::new(UnavailableOcr))
}

/// Start the service and block until interrupted.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("docfield starting v{}", config::APP_VERSION);

    let service = Arc::new(build_service()?);
    let server = api::server::start(service, config::bind_addr()).await?;
    tracing::info!(addr = %server.addr, "docfield ready");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed waiting for shutdown signal: {e}"))?;
    tracing::info!("Interrupt received, shutting down");
    server.shutdown().await;
    Ok(())
}
