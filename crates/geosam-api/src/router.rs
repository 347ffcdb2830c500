use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // UI + health
        .route("/", get(handlers::index_page))
        .route("/health", get(handlers::health_check))

        // Segmentation workflow
        .route("/api/v1/segment", post(handlers::run_segmentation))
        .route("/api/v1/session", get(handlers::get_session))
        .route("/api/v1/reset", post(handlers::reset_session))

        // Map overlays
        .route("/api/v1/vector", get(handlers::vector_overlay))
        .route("/api/v1/artifacts/tile", get(handlers::tile_artifact))
        .route("/api/v1/artifacts/mask", get(handlers::mask_overlay_artifact))
        .route("/api/v1/artifacts/visualization", get(handlers::visualization_artifact))

        // Downloads
        .route("/api/v1/download/mask", get(handlers::download_mask))
        .route("/api/v1/download/visualization", get(handlers::download_visualization))
        .route("/api/v1/download/shapefile", get(handlers::download_shapefile))

        .with_state(state)
}
