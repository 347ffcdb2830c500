//! Raster side of the pipeline: georeferencing, colormaps, and the
//! mask-over-tile visualization image.

pub mod colormap;
pub mod visualize;
pub mod worldfile;

pub use colormap::Colormap;
pub use visualize::{colorized_mask_png, render_overlay};
pub use worldfile::{read_world_file, world_file_path, write_world_file, GeoTransform};
