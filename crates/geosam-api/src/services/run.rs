use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use geosam_core::export::remove_stale;
use geosam_core::models::{AutomaticParams, RunMode, RunRecord};
use geosam_core::raster::{render_overlay, write_world_file, Colormap};
use geosam_core::tiles::download_tiles;
use geosam_core::vector::vectorize_mask;
use geosam_core::GeosamError;

use crate::dto::SegmentRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// Service driving one segmentation run end to end.
pub struct RunService;

impl RunService {
    /// Execute the pipeline: clean the fixed artifact paths, download the
    /// tile mosaic, run the selected segmentation variant, render the
    /// visualization, vectorize the mask, and return the results record.
    ///
    /// Any failure propagates without touching the session; partial files
    /// on disk are left for the next run's cleanup.
    pub async fn execute(state: &AppState, request: &SegmentRequest) -> Result<RunRecord, ApiError> {
        let bbox = request.bounding_box();
        let config = &request.config;

        if !bbox.is_ordered() {
            // Deliberately only a warning; the downloader decides.
            tracing::warn!(bbox = ?bbox.to_array(), "Bounding box ordering looks inverted");
        }

        std::fs::create_dir_all(state.paths.dir()).map_err(GeosamError::Io)?;
        for stale in state.paths.all() {
            remove_stale(&stale);
        }

        let tile_path = state.paths.tile();
        let mosaic = download_tiles(
            state.fetcher.as_ref(),
            &state.tile_source,
            bbox,
            state.zoom,
            &tile_path,
        )
        .await?;

        let image_png = std::fs::read(&mosaic.path).map_err(GeosamError::Io)?;
        let mask_path = state.paths.mask();

        let started = Instant::now();
        let mask_png = match config.mode {
            RunMode::Automatic => {
                state.automatic.generate(&image_png, &AutomaticParams::default()).await?
            }
            RunMode::TextPrompt => {
                let prompt = config.prompt.as_deref().unwrap_or("");
                tracing::info!(prompt = prompt, "Running text-prompt segmentation");
                state
                    .prompt
                    .predict(&image_png, prompt, config.box_threshold, config.text_threshold)
                    .await?
            }
        };

        std::fs::write(&mask_path, &mask_png).map_err(GeosamError::Io)?;
        // The mask is pixel-aligned with the tile and shares its transform.
        write_world_file(&mask_path, &mosaic.transform)?;

        let visualization_path = state.paths.visualization();
        render_overlay(&tile_path, &mask_path, &visualization_path, Colormap::Greens)?;
        let duration_secs = started.elapsed().as_secs_f64();

        let vector_path = state.paths.vector();
        let features = vectorize_mask(&mask_path, &mosaic.transform, &vector_path)?;

        let record = RunRecord {
            id: Uuid::new_v4(),
            mode: config.mode,
            prompt: config.prompt.clone(),
            title: config.title(),
            bbox,
            extent: {
                let (w, s, e, n) = mosaic.transform.extent(mosaic.width, mosaic.height);
                [w, s, e, n]
            },
            duration_secs,
            finished_at: Utc::now(),
            tile_path,
            mask_path,
            vector_path,
            visualization_path,
            palette: config.mode.mask_palette().to_string(),
            feature_count: features.len(),
        };

        tracing::info!(
            run_id = %record.id,
            mode = ?record.mode,
            duration_secs = record.duration_secs,
            features = record.feature_count,
            "Segmentation run finished"
        );
        Ok(record)
    }
}
