use std::env;
use std::path::PathBuf;

/// Highest zoom accepted from the environment.
const MAX_ZOOM: u8 = 22;

/// API server configuration loaded from environment variables.
///
/// Pipeline parameters (bounding box, mode, prompt, thresholds) are never
/// configured here; they arrive with each run request from the UI.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Directory the artifact files live in.
    pub data_dir: PathBuf,
    /// Remote inference server; without it the mock segmenter is used.
    pub inference_url: Option<String>,
    /// Named basemap source for the tile downloader.
    pub tile_source: String,
    pub zoom: u8,
    /// Serve synthetic tiles instead of hitting tile servers.
    pub offline_tiles: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let port = env::var("GEOSAM_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

        let cors_origin =
            env::var("GEOSAM_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let data_dir = env::var("GEOSAM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let inference_url = env::var("GEOSAM_INFERENCE_URL").ok();

        let tile_source =
            env::var("GEOSAM_TILE_SOURCE").unwrap_or_else(|_| "Satellite".to_string());

        // Capped so the tile math's bit shifts stay in range.
        let zoom = env::var("GEOSAM_ZOOM")
            .ok()
            .and_then(|z| z.parse().ok())
            .unwrap_or(18)
            .min(MAX_ZOOM);

        let offline_tiles = env::var("GEOSAM_OFFLINE_TILES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self { port, cors_origin, data_dir, inference_url, tile_source, zoom, offline_tiles }
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_zoom_is_capped() {
        env::set_var("GEOSAM_ZOOM", "40");
        let config = ApiConfig::from_env();
        env::remove_var("GEOSAM_ZOOM");

        assert_eq!(config.zoom, MAX_ZOOM);
        // Capped zoom must stay usable by the tile math.
        assert!(1u32.checked_shl(u32::from(config.zoom)).is_some());
    }
}
