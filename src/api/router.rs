//! Extraction API router.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::service::ExtractionService;

/// Build the extraction API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(service: Arc<ExtractionService>) -> Router {
    let ctx = ApiContext::new(service);
    Router::new()
        .route("/extract", post(endpoints::extract::extract))
        .route("/health", get(endpoints::health::check))
        .route("/knowledge/:label", get(endpoints::knowledge::history))
        .with_state(ctx)
}
