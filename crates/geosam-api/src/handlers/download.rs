//! Direct download endpoints with fixed suggested filenames.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::ApiError;
use crate::services::ExportService;
use crate::state::AppState;

fn attachment(
    bytes: Vec<u8>,
    content_type: &'static str,
    filename: &'static str,
) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        bytes,
    )
}

/// The mask raster (georeferenced PNG).
pub async fn download_mask(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = ExportService::artifact_bytes(&state.paths.mask())?;
    Ok(attachment(bytes, "image/png", "segmentation.png"))
}

/// The flat visualization image.
pub async fn download_visualization(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = ExportService::artifact_bytes(&state.paths.visualization())?;
    Ok(attachment(bytes, "image/png", "visualization.png"))
}

/// The zipped shapefile, built from whichever sidecars exist right now.
pub async fn download_shapefile(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = ExportService::shapefile_archive(&state)?;
    Ok(attachment(bytes, "application/zip", "segmentation_shp.zip"))
}
