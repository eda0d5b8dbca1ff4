use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pipeline::fields::FieldSchema;
use crate::service::ExtractionService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<ExtractionService>,
}

impl ApiContext {
    pub fn new(service: Arc<ExtractionService>) -> Self {
        Self { service }
    }
}

/// `POST /extract` request body.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Caller-supplied identifier grouping results in the knowledge store.
    pub label: String,
    /// Ordered field name → description mapping; key presence selects the
    /// heuristic rule set.
    pub extraction_schema: FieldSchema,
    /// Base64-encoded PDF bytes.
    pub pdf: String,
}

/// `GET /health` response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
