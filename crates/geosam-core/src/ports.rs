//! Port trait definitions
//!
//! These traits define the interfaces that tile and segmentation adapters
//! must implement. The pipeline consumes them as black boxes: tiles and
//! masks cross the boundary as encoded PNG bytes.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::run::AutomaticParams;
use crate::tiles::TileCoord;

/// Port for fetching one basemap tile from an XYZ source.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    /// Fetch the encoded image bytes for a single tile.
    async fn fetch_tile(&self, url_template: &str, tile: TileCoord) -> Result<Vec<u8>>;
}

/// Port for the automatic "segment everything" variant.
///
/// Returns an 8-bit grayscale PNG mask the size of the input image:
/// 0 is background/nodata, nonzero values identify detected objects.
#[async_trait]
pub trait AutomaticSegmenter: Send + Sync {
    async fn generate(&self, image_png: &[u8], params: &AutomaticParams) -> Result<Vec<u8>>;
}

/// Port for the text-prompt-guided variant.
///
/// Same mask contract as [`AutomaticSegmenter`]; regions matching the
/// phrase are nonzero.
#[async_trait]
pub trait PromptSegmenter: Send + Sync {
    async fn predict(
        &self,
        image_png: &[u8],
        prompt: &str,
        box_threshold: f32,
        text_threshold: f32,
    ) -> Result<Vec<u8>>;
}
