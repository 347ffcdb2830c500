use std::path::Path;

use geosam_core::export::{read_artifact, write_shapefile_archive};

use crate::error::ApiError;
use crate::state::AppState;

/// Service backing the three download actions.
pub struct ExportService;

impl ExportService {
    /// Full byte content of an artifact file (mask or visualization).
    pub fn artifact_bytes(path: &Path) -> Result<Vec<u8>, ApiError> {
        Ok(read_artifact(path)?)
    }

    /// Build the shapefile archive from whichever sidecars exist and
    /// return its bytes. Missing sidecars are skipped, never an error.
    pub fn shapefile_archive(state: &AppState) -> Result<Vec<u8>, ApiError> {
        let zip_path = state.paths.archive();
        write_shapefile_archive(&state.paths.vector(), &zip_path)?;
        Ok(read_artifact(&zip_path)?)
    }
}
