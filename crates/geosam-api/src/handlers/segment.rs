use std::sync::Arc;

use axum::{extract::State, Json};

use geosam_core::models::RunRecord;

use crate::dto::SegmentRequest;
use crate::error::ApiError;
use crate::services::RunService;
use crate::state::AppState;

/// Run the full segmentation pipeline for the submitted bounding box and
/// config. The session lock is held for the whole run, so interactions
/// stay strictly one at a time; a failed run leaves the session untouched.
pub async fn run_segmentation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SegmentRequest>,
) -> Result<Json<RunRecord>, ApiError> {
    tracing::info!(
        mode = ?request.config.mode,
        bbox = ?request.bbox,
        "Segmentation run requested"
    );

    let mut session = state.session.lock().await;
    let record = RunService::execute(&state, &request).await?;
    session.finish_run(record.clone());

    Ok(Json(record))
}
