use serde::Deserialize;

use geosam_core::models::{BoundingBox, RunConfig};

/// Segmentation run request body.
///
/// Every request carries the complete current widget state; nothing is
/// remembered between requests, so switching modes can never leak a stale
/// prompt or threshold into a run.
#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    /// `[west, south, east, north]` in degrees.
    pub bbox: [f64; 4],
    #[serde(flatten)]
    pub config: RunConfig,
}

impl SegmentRequest {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_array(self.bbox)
    }
}
