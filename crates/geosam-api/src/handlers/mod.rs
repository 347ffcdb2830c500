mod artifacts;
mod download;
mod health;
mod page;
mod segment;
mod session;

pub use artifacts::{mask_overlay_artifact, tile_artifact, vector_overlay, visualization_artifact};
pub use download::{download_mask, download_shapefile, download_visualization};
pub use health::health_check;
pub use page::index_page;
pub use segment::run_segmentation;
pub use session::{get_session, reset_session};
