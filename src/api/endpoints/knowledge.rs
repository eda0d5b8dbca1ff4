//! `GET /knowledge/:label` — extraction history recorded under a label.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::fields::FieldMap;

pub async fn history(
    State(ctx): State<ApiContext>,
    Path(label): Path<String>,
) -> Result<Json<Vec<FieldMap>>, ApiError> {
    let entries = ctx
        .service
        .knowledge()
        .history(&label)
        .map_err(|e| ApiError::Storage(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("No history for label '{label}'")))?;

    Ok(Json(entries))
}
