//! Inline artifact endpoints feeding the result map and comparison view.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use geojson::FeatureCollection;
use geosam_core::raster::{colorized_mask_png, read_world_file, Colormap};
use geosam_core::vector::{load_mask_features, to_feature_collection};

use crate::error::ApiError;
use crate::services::ExportService;
use crate::state::AppState;

fn png_response(bytes: Vec<u8>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], bytes)
}

/// The downloaded satellite mosaic.
pub async fn tile_artifact(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(png_response(ExportService::artifact_bytes(&state.paths.tile())?))
}

/// The mask, colorized with the run's palette and transparent nodata,
/// ready for use as a map overlay.
pub async fn mask_overlay_artifact(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let palette = {
        let session = state.session.lock().await;
        session
            .results
            .as_ref()
            .map(|r| r.palette.clone())
            .ok_or_else(|| ApiError::not_found("No results in this session"))?
    };

    let cmap = Colormap::from_name(&palette).unwrap_or(Colormap::Greens);
    Ok(png_response(colorized_mask_png(&state.paths.mask(), cmap)?))
}

/// The flat comparison visualization.
pub async fn visualization_artifact(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(png_response(ExportService::artifact_bytes(&state.paths.visualization())?))
}

/// Vectorized mask regions as GeoJSON for the result map.
pub async fn vector_overlay(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureCollection>, ApiError> {
    {
        let session = state.session.lock().await;
        if !session.has_results() {
            return Err(ApiError::not_found("No results in this session"));
        }
    }

    let mask_path = state.paths.mask();
    let transform = read_world_file(&mask_path)?;
    let features = load_mask_features(&mask_path, &transform)?;
    Ok(Json(to_feature_collection(&features)))
}
