//! Session state: the one piece of data that survives between interactions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::bbox::BoundingBox;
use crate::models::run::RunMode;

/// Durable record of a completed segmentation run.
///
/// Holds only artifact paths, never artifact bytes; artifact lifetime is
/// governed by the cleanup performed at the start of the next run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: Uuid,
    pub mode: RunMode,
    /// Prompt text, text-prompt runs only.
    pub prompt: Option<String>,
    /// Results header, e.g. "Segmentation of tree".
    pub title: String,
    pub bbox: BoundingBox,
    /// Actual extent of the downloaded raster (west, south, east, north);
    /// slightly wider than the requested box due to pixel snapping.
    pub extent: [f64; 4],
    /// Wall-clock seconds spent in inference + visualization.
    pub duration_secs: f64,
    pub finished_at: DateTime<Utc>,
    pub tile_path: PathBuf,
    pub mask_path: PathBuf,
    pub vector_path: PathBuf,
    pub visualization_path: PathBuf,
    /// Palette the mask overlay was colorized with.
    pub palette: String,
    /// Number of vector features produced from the mask.
    pub feature_count: usize,
}

/// Per-session UI state: either the input screen or a results record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub results: Option<RunRecord>,
    pub map_visible: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { results: None, map_visible: true }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished run and hide the input map.
    pub fn finish_run(&mut self, record: RunRecord) {
        self.results = Some(record);
        self.map_visible = false;
    }

    /// Back to the initial input screen.
    pub fn reset(&mut self) {
        self.results = None;
        self.map_visible = true;
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }
}
