use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use geosam_core::models::SessionState;
use geosam_core::ports::{AutomaticSegmenter, PromptSegmenter, TileFetcher};
use geosam_core::raster::world_file_path;

/// Fixed artifact locations under the data directory.
///
/// Every run writes to the same paths; the previous run's files are
/// removed (best effort) before new ones are created.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    dir: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tile(&self) -> PathBuf {
        self.dir.join("satellite.png")
    }

    pub fn mask(&self) -> PathBuf {
        self.dir.join("masks.png")
    }

    pub fn vector(&self) -> PathBuf {
        self.dir.join("masks.shp")
    }

    pub fn visualization(&self) -> PathBuf {
        self.dir.join("visualization.png")
    }

    pub fn archive(&self) -> PathBuf {
        self.dir.join("segmentation_shp.zip")
    }

    /// Every path a run may write, for pre-run cleanup.
    pub fn all(&self) -> Vec<PathBuf> {
        let mut paths = vec![
            self.tile(),
            world_file_path(&self.tile()),
            self.mask(),
            world_file_path(&self.mask()),
            self.visualization(),
            self.archive(),
        ];
        for ext in geosam_core::export::SIDECAR_EXTENSIONS {
            paths.push(self.vector().with_extension(ext));
        }
        paths
    }
}

pub struct AppState {
    /// The one piece of state that outlives a request. Held for the whole
    /// run so interactions stay serialized, one at a time.
    pub session: Mutex<SessionState>,
    pub paths: ArtifactPaths,
    pub fetcher: Arc<dyn TileFetcher>,
    pub automatic: Arc<dyn AutomaticSegmenter>,
    pub prompt: Arc<dyn PromptSegmenter>,
    pub tile_source: String,
    pub zoom: u8,
}

impl AppState {
    pub fn new(
        paths: ArtifactPaths,
        fetcher: Arc<dyn TileFetcher>,
        automatic: Arc<dyn AutomaticSegmenter>,
        prompt: Arc<dyn PromptSegmenter>,
        tile_source: String,
        zoom: u8,
    ) -> Self {
        Self {
            session: Mutex::new(SessionState::new()),
            paths,
            fetcher,
            automatic,
            prompt,
            tile_source,
            zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths_share_data_dir() {
        let paths = ArtifactPaths::new("/tmp/geosam");
        assert_eq!(paths.tile(), PathBuf::from("/tmp/geosam/satellite.png"));
        assert_eq!(paths.vector(), PathBuf::from("/tmp/geosam/masks.shp"));
        assert_eq!(paths.archive(), PathBuf::from("/tmp/geosam/segmentation_shp.zip"));
    }

    #[test]
    fn test_cleanup_list_covers_sidecars() {
        let paths = ArtifactPaths::new("/tmp/geosam");
        let all = paths.all();
        for ext in ["shp", "shx", "dbf", "prj", "pgw"] {
            assert!(
                all.iter().any(|p| p.extension().is_some_and(|e| e == ext)),
                "no .{} in cleanup list",
                ext
            );
        }
    }
}
